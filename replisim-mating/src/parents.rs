use rand::Rng;
use rand_distr::{Uniform, WeightedAliasIndex};
use replisim_core::SubPopId;

use crate::MatingError;

/// Draws parents, with replacement, from a set of individuals.
#[derive(Debug)]
pub(crate) enum ParentSampler {
    Uniform {
        indexes: Vec<usize>,
        lookup: Uniform<usize>,
    },
    Weighted {
        indexes: Vec<usize>,
        lookup: WeightedAliasIndex<f64>,
    },
}

impl ParentSampler {
    /// `fitness` is indexed by individual, not by position in `indexes`.
    ///
    /// # Errors
    ///
    /// * `indexes` is empty.
    /// * the fitness of every candidate is zero.
    pub(crate) fn new(
        indexes: Vec<usize>,
        fitness: Option<&[f64]>,
        subpop: SubPopId,
    ) -> Result<Self, MatingError> {
        if indexes.is_empty() {
            return Err(MatingError::EmptyParentalSubpop { subpop });
        }
        match fitness {
            None => {
                let lookup = Uniform::new(0, indexes.len());
                Ok(Self::Uniform { indexes, lookup })
            }
            Some(fitness) => {
                let weights = indexes
                    .iter()
                    .map(|&i| fitness.get(i).copied().unwrap_or(0.0))
                    .collect::<Vec<_>>();
                let lookup = WeightedAliasIndex::new(weights)
                    .map_err(|_| MatingError::InvalidFitness { subpop })?;
                Ok(Self::Weighted { indexes, lookup })
            }
        }
    }

    pub(crate) fn sample<T: Rng>(&self, rng: &mut T) -> usize {
        match self {
            Self::Uniform { indexes, lookup } => indexes[rng.sample(lookup)],
            Self::Weighted { indexes, lookup } => indexes[rng.sample(lookup)],
        }
    }
}
