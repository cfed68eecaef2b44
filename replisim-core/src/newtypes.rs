/// Global index of a locus, counting across chromosomes.
///
/// ```
/// # use replisim_core::LocusId;
/// let l = LocusId::from(3);
/// assert_eq!(l, 3);
/// assert!(l < 4);
/// assert_eq!(usize::from(l), 3);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct LocusId(usize);

/// Index of a subpopulation.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct SubPopId(usize);

/// Index of a replicate within a simulator.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct ReplicateId(usize);

impl_index_newtype!(LocusId);
impl_index_newtype!(SubPopId);
impl_index_newtype!(ReplicateId);
