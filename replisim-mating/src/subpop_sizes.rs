use replisim_core::{Generation, Population};

use crate::MatingError;

pub type SubPopSizeFn = Box<dyn Fn(Generation, &[usize]) -> Vec<usize> + Send + Sync>;

/// Subpopulation sizes of the offspring generation.
#[derive(Default)]
pub enum SubPopSizes {
    /// Same sizes as the parental generation.
    #[default]
    Keep,
    /// One size per parental subpopulation.
    Fixed(Vec<usize>),
    /// Called with the parental generation and subpopulation sizes.
    Function(SubPopSizeFn),
}

impl std::fmt::Debug for SubPopSizes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "Keep"),
            Self::Fixed(sizes) => f.debug_tuple("Fixed").field(sizes).finish(),
            Self::Function(_) => write!(f, "Function(..)"),
        }
    }
}

impl SubPopSizes {
    pub fn resolve(&self, pop: &Population) -> Result<Vec<usize>, MatingError> {
        let sizes = match self {
            Self::Keep => return Ok(pop.subpop_sizes().to_vec()),
            Self::Fixed(sizes) => sizes.clone(),
            Self::Function(f) => f(pop.generation(), pop.subpop_sizes()),
        };
        if sizes.len() != pop.num_subpops() {
            return Err(MatingError::SubPopSizeCount {
                expected: pop.num_subpops(),
                found: sizes.len(),
            });
        }
        Ok(sizes)
    }
}
