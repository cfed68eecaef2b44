use std::collections::BTreeMap;

use rand::RngCore;
use replisim_core::{Allele, LocusId, Population};

use crate::{Action, Applicability, Operator, ReplisimError};

/// Fitness from the genotype at one locus of a diploid population.
///
/// Genotypes are unordered: `(0, 1)` and `(1, 0)` are the same key.
/// Fitness values are consumed by the next mating, so this
/// belongs with the pre-mating operators.
#[derive(Debug)]
pub struct MapSelector {
    locus: LocusId,
    fitness: BTreeMap<(Allele, Allele), f64>,
    default: f64,
    applicability: Applicability,
}

fn key(a: Allele, b: Allele) -> (Allele, Allele) {
    (a.min(b), a.max(b))
}

impl MapSelector {
    /// Genotypes missing from `fitness` get fitness 1.
    ///
    /// # Returns
    ///
    /// `None` if a fitness value is negative or not finite.
    pub fn new(locus: LocusId, fitness: &[((Allele, Allele), f64)]) -> Option<Self> {
        if fitness.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) {
            return None;
        }
        Some(Self {
            locus,
            fitness: fitness.iter().map(|&((a, b), w)| (key(a, b), w)).collect(),
            default: 1.0,
            applicability: Applicability::default(),
        })
    }

    pub fn default_fitness(mut self, default: f64) -> Option<Self> {
        if !default.is_finite() || default < 0.0 {
            return None;
        }
        self.default = default;
        Some(self)
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn fitness(&self, a: Allele, b: Allele) -> f64 {
        self.fitness.get(&key(a, b)).copied().unwrap_or(self.default)
    }
}

impl Operator for MapSelector {
    fn name(&self) -> &str {
        "MapSelector"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        _rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        if pop.ploidy() != 2 {
            return Err(ReplisimError::InvalidParameter(format!(
                "MapSelector needs a diploid population, ploidy is {}",
                pop.ploidy()
            )));
        }
        if !pop.structure().contains(self.locus) {
            return Err(ReplisimError::LocusOutOfRange {
                locus: self.locus,
                total: pop.structure().total_loci(),
            });
        }
        let weights = pop
            .individuals()
            .iter()
            .map(|ind| self.fitness(ind.allele(0, self.locus), ind.allele(1, self.locus)))
            .collect();
        pop.set_fitness(weights)?;
        Ok(Action::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use replisim_core::GenoStructure;

    #[test]
    fn test_unordered_genotypes() {
        let s = MapSelector::new(LocusId::from(0), &[((1, 0), 0.5), ((1, 1), 0.0)]).unwrap();
        assert_eq!(s.fitness(0, 1), 0.5);
        assert_eq!(s.fitness(1, 0), 0.5);
        assert_eq!(s.fitness(1, 1), 0.0);
        assert_eq!(s.fitness(0, 0), 1.0);
        let s = s.default_fitness(2.0).unwrap();
        assert_eq!(s.fitness(0, 0), 2.0);
        assert!(MapSelector::new(LocusId::from(0), &[((0, 0), -1.0)]).is_none());
    }

    #[test]
    fn test_sets_population_fitness() {
        let mut pop = Population::new(&[3], GenoStructure::new(2, &[1]).unwrap()).unwrap();
        pop.individuals_mut()[1].set_allele(1, LocusId::from(0), 1);
        let mut s = MapSelector::new(LocusId::from(0), &[((0, 1), 0.25)]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        s.apply(&mut pop, &mut rng).unwrap();
        assert_eq!(pop.fitness(), Some(&[1.0, 0.25, 1.0][..]));
    }

    #[test]
    fn test_locus_out_of_range() {
        let mut pop = Population::new(&[3], GenoStructure::new(2, &[1]).unwrap()).unwrap();
        let mut s = MapSelector::new(LocusId::from(4), &[]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        assert!(matches!(
            s.apply(&mut pop, &mut rng),
            Err(ReplisimError::LocusOutOfRange { .. })
        ));
    }
}
