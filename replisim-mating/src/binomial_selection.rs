use rand::Rng;
use replisim_core::{Population, SubPopId};

use crate::families::fill_families;
use crate::num_offspring::FamilySizes;
use crate::parents::ParentSampler;
use crate::{MatingError, MatingScheme, NumOffspring, SubPopSizes};

/// Sexless random selection.
///
/// Each offspring is a copy of a parent drawn with replacement
/// from its subpopulation, so this works for haploid populations too.
#[derive(Debug, Default)]
pub struct BinomialSelection {
    num_offspring: NumOffspring,
    subpop_sizes: SubPopSizes,
}

impl BinomialSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_offspring(mut self, num_offspring: NumOffspring) -> Self {
        self.num_offspring = num_offspring;
        self
    }

    pub fn with_subpop_sizes(mut self, subpop_sizes: SubPopSizes) -> Self {
        self.subpop_sizes = subpop_sizes;
        self
    }
}

impl MatingScheme for BinomialSelection {
    fn name(&self) -> &str {
        "binomial random selection"
    }

    fn mate<T: Rng>(&mut self, pop: &mut Population, rng: &mut T) -> Result<(), MatingError> {
        let sizes = self.subpop_sizes.resolve(pop)?;
        let family_sizes = FamilySizes::new(&self.num_offspring, pop.generation())
            .ok_or_else(|| {
                MatingError::InvalidNumOffspring(format!("{:?}", self.num_offspring))
            })?;
        let fitness = pop.take_fitness();
        let mut offspring = Vec::with_capacity(sizes.iter().sum());
        let mut families = 0;
        for (i, &target) in sizes.iter().enumerate() {
            if target == 0 {
                continue;
            }
            let subpop = SubPopId::from(i);
            let range = pop
                .subpop_range(subpop)
                .ok_or(MatingError::EmptyParentalSubpop { subpop })?;
            let parents = ParentSampler::new(range.collect(), fitness.as_deref(), subpop)?;
            let individuals = pop.individuals();
            families += fill_families(
                target,
                &family_sizes,
                rng,
                |rng| parents.sample(rng),
                |&p, _| individuals[p].clone(),
                &mut offspring,
            )
            .ok_or(MatingError::NoOffspring { subpop })?;
        }
        tracing::debug!(
            generation = %pop.generation(),
            families,
            offspring = offspring.len(),
            "{}",
            self.name()
        );
        pop.replace_offspring(offspring, sizes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use replisim_core::{GenoStructure, LocusId, Sex};

    fn haploid_pop() -> Population {
        let mut pop = Population::new(&[4, 4], GenoStructure::new(1, &[1]).unwrap()).unwrap();
        for (i, ind) in pop.individuals_mut().iter_mut().enumerate() {
            ind.set_allele(0, LocusId::from(0), i as u8);
            ind.set_sex(if i % 2 == 0 { Sex::Male } else { Sex::Female });
        }
        pop
    }

    #[test]
    fn test_offspring_copy_parents_within_subpop() {
        let mut pop = haploid_pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(13);
        BinomialSelection::new().mate(&mut pop, &mut rng).unwrap();
        assert_eq!(pop.subpop_sizes(), &[4, 4]);
        for (i, ind) in pop.individuals().iter().enumerate() {
            let a = ind.allele(0, LocusId::from(0));
            if i < 4 {
                assert!(a < 4);
            } else {
                assert!((4..8).contains(&a));
            }
            let expected_sex = if a % 2 == 0 { Sex::Male } else { Sex::Female };
            assert_eq!(ind.sex(), expected_sex);
        }
    }

    #[test]
    fn test_fitness_weighting() {
        let mut pop = haploid_pop();
        let mut fitness = vec![0.0; 8];
        fitness[2] = 1.0;
        fitness[6] = 1.0;
        pop.set_fitness(fitness).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        BinomialSelection::new().mate(&mut pop, &mut rng).unwrap();
        let alleles = pop
            .individuals()
            .iter()
            .map(|i| i.allele(0, LocusId::from(0)))
            .collect::<Vec<_>>();
        assert_eq!(alleles, vec![2, 2, 2, 2, 6, 6, 6, 6]);
        assert!(pop.fitness().is_none());
    }

    #[test]
    fn test_resize() {
        let mut pop = haploid_pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut m = BinomialSelection::new()
            .with_subpop_sizes(SubPopSizes::Fixed(vec![10, 0]))
            .with_num_offspring(NumOffspring::fixed(3).unwrap());
        m.mate(&mut pop, &mut rng).unwrap();
        assert_eq!(pop.pop_size(), 10);
        assert_eq!(pop.subpop_sizes(), &[10, 0]);
    }

    #[test]
    fn test_empty_parental_subpop() {
        let mut pop = Population::new(&[0, 2], GenoStructure::new(1, &[1]).unwrap()).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut m = BinomialSelection::new().with_subpop_sizes(SubPopSizes::Fixed(vec![2, 2]));
        assert_eq!(
            m.mate(&mut pop, &mut rng),
            Err(MatingError::EmptyParentalSubpop {
                subpop: SubPopId::from(0)
            })
        );
    }
}
