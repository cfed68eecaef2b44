//! Mating schemes: how an offspring generation is
//! produced from the current one.

use rand::Rng;
use replisim_core::Population;

mod binomial_selection;
mod error;
mod families;
mod no_mating;
mod num_offspring;
mod offspring;
mod parents;
mod random_mating;
mod subpop_sizes;

pub use binomial_selection::BinomialSelection;
pub use error::MatingError;
pub use no_mating::NoMating;
pub use num_offspring::{NumOffspring, NumOffspringFn};
pub use random_mating::RandomMating;
pub use subpop_sizes::{SubPopSizeFn, SubPopSizes};

/// Replace a population by its offspring generation.
pub trait MatingScheme {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Check that the scheme can be applied to `pop`.
    fn is_compatible(&self, _pop: &Population) -> Result<(), MatingError> {
        Ok(())
    }

    /// Produce the next generation.
    ///
    /// Fitness values stored in `pop` weight parent choice
    /// and are consumed.
    fn mate<T: Rng>(&mut self, pop: &mut Population, rng: &mut T) -> Result<(), MatingError>;
}
