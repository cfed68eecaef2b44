use rand::Rng;
use replisim_core::Population;

use crate::{MatingError, MatingScheme};

/// Keep the parental generation as is.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoMating {}

impl NoMating {
    pub fn new() -> Self {
        Self {}
    }
}

impl MatingScheme for NoMating {
    fn name(&self) -> &str {
        "no mating"
    }

    fn mate<T: Rng>(&mut self, pop: &mut Population, _rng: &mut T) -> Result<(), MatingError> {
        let _ = pop.take_fitness();
        Ok(())
    }
}
