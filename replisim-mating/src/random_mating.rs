use rand::Rng;
use replisim_core::{Population, SubPopId};

use crate::families::fill_families;
use crate::num_offspring::FamilySizes;
use crate::offspring::mendelian_offspring;
use crate::parents::ParentSampler;
use crate::{MatingError, MatingScheme, NumOffspring, SubPopSizes};

/// Diploid sexual random mating.
///
/// Within each subpopulation a father is drawn from the males and
/// a mother from the females, with replacement. If a subpopulation
/// holds a single sex, parents are drawn from everyone when
/// `cont_when_uni_sex` is set, and mating fails otherwise.
#[derive(Debug)]
pub struct RandomMating {
    num_offspring: NumOffspring,
    subpop_sizes: SubPopSizes,
    cont_when_uni_sex: bool,
}

impl Default for RandomMating {
    fn default() -> Self {
        Self {
            num_offspring: NumOffspring::default(),
            subpop_sizes: SubPopSizes::default(),
            cont_when_uni_sex: true,
        }
    }
}

impl RandomMating {
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

    pub fn cont_when_uni_sex(mut self, cont: bool) -> Self {
        self.cont_when_uni_sex = cont;
        self
    }

    fn parent_pools(
        &self,
        pop: &Population,
        subpop: SubPopId,
    ) -> Result<(Vec<usize>, Vec<usize>), MatingError> {
        let range = pop
            .subpop_range(subpop)
            .ok_or(MatingError::EmptyParentalSubpop { subpop })?;
        let (males, females): (Vec<usize>, Vec<usize>) = range
            .clone()
            .partition(|&i| pop.individuals()[i].sex().is_male());
        if !males.is_empty() && !females.is_empty() {
            return Ok((males, females));
        }
        if range.is_empty() {
            return Err(MatingError::EmptyParentalSubpop { subpop });
        }
        if !self.cont_when_uni_sex {
            return Err(MatingError::UniSex { subpop });
        }
        tracing::warn!(
            %subpop,
            generation = %pop.generation(),
            "only one sex present, parents drawn regardless of sex"
        );
        Ok((range.clone().collect(), range.collect()))
    }
}

impl MatingScheme for RandomMating {
    fn name(&self) -> &str {
        "sexual random mating"
    }

    fn is_compatible(&self, pop: &Population) -> Result<(), MatingError> {
        if pop.ploidy() != 2 {
            return Err(MatingError::IncompatiblePloidy {
                scheme: "RandomMating",
                expected: 2,
                found: pop.ploidy(),
            });
        }
        Ok(())
    }

    fn mate<T: Rng>(&mut self, pop: &mut Population, rng: &mut T) -> Result<(), MatingError> {
        self.is_compatible(pop)?;
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
            let (males, females) = self.parent_pools(pop, subpop)?;
            let dads = ParentSampler::new(males, fitness.as_deref(), subpop)?;
            let moms = ParentSampler::new(females, fitness.as_deref(), subpop)?;
            let individuals = pop.individuals();
            let structure = pop.structure();
            families += fill_families(
                target,
                &family_sizes,
                rng,
                |rng| (dads.sample(rng), moms.sample(rng)),
                |&(dad, mom), rng| {
                    mendelian_offspring(structure, &individuals[dad], &individuals[mom], rng)
                },
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
