#![macro_use]

macro_rules! impl_index_newtype {
    ($idtype: ident) => {
        impl $idtype {
            /// Create a new index
            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            /// The underlying index
            pub const fn as_usize(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $idtype {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$idtype> for usize {
            fn from(value: $idtype) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $idtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                write!(f, "{}", self.0)
            }
        }

        impl PartialEq<usize> for $idtype {
            fn eq(&self, other: &usize) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$idtype> for usize {
            fn eq(&self, other: &$idtype) -> bool {
                *self == other.0
            }
        }

        impl PartialOrd<usize> for $idtype {
            fn partial_cmp(&self, other: &usize) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl PartialOrd<$idtype> for usize {
            fn partial_cmp(&self, other: &$idtype) -> Option<std::cmp::Ordering> {
                self.partial_cmp(&other.0)
            }
        }
    };
}
