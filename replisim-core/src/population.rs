use std::ops::Range;
use std::sync::Arc;

use crate::Error;
use crate::GenoStructure;
use crate::Generation;
use crate::Individual;
use crate::PopVars;
use crate::SubPopId;

/// A population of individuals sharing one [`GenoStructure`],
/// partitioned into contiguous subpopulations.
#[derive(Clone, Debug)]
pub struct Population {
    structure: Arc<GenoStructure>,
    individuals: Vec<Individual>,
    subpop_sizes: Vec<usize>,
    generation: Generation,
    vars: PopVars,
    fitness: Option<Vec<f64>>,
}

impl Population {
    /// Create a population with every allele set to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use replisim_core::{GenoStructure, Population, SubPopId};
    /// let pop = Population::new(&[60, 40], GenoStructure::new(2, &[2]).unwrap()).unwrap();
    /// assert_eq!(pop.pop_size(), 100);
    /// assert_eq!(pop.num_subpops(), 2);
    /// assert_eq!(pop.subpop_range(SubPopId::from(1)), Some(60..100));
    /// ```
    pub fn new(subpop_sizes: &[usize], structure: GenoStructure) -> Result<Self, Error> {
        if subpop_sizes.is_empty() {
            return Err(Error::NoSubpopulations);
        }
        let size = subpop_sizes.iter().sum();
        let individuals = vec![Individual::new(&structure); size];
        Ok(Self {
            structure: Arc::new(structure),
            individuals,
            subpop_sizes: subpop_sizes.to_vec(),
            generation: Generation::ZERO,
            vars: PopVars::default(),
            fitness: None,
        })
    }

    pub fn structure(&self) -> &GenoStructure {
        &self.structure
    }

    pub fn ploidy(&self) -> usize {
        self.structure.ploidy()
    }

    pub fn pop_size(&self) -> usize {
        self.individuals.len()
    }

    pub fn num_subpops(&self) -> usize {
        self.subpop_sizes.len()
    }

    pub fn subpop_sizes(&self) -> &[usize] {
        &self.subpop_sizes
    }

    pub fn subpop_size(&self, subpop: SubPopId) -> Option<usize> {
        self.subpop_sizes.get(subpop.as_usize()).copied()
    }

    /// Indexes of the individuals in `subpop`.
    pub fn subpop_range(&self, subpop: SubPopId) -> Option<Range<usize>> {
        let size = self.subpop_size(subpop)?;
        let begin: usize = self.subpop_sizes[..subpop.as_usize()].iter().sum();
        Some(begin..begin + size)
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn individual(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn set_generation(&mut self, generation: Generation) {
        self.generation = generation;
    }

    pub fn vars(&self) -> &PopVars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut PopVars {
        &mut self.vars
    }

    /// Set per-individual selection weights for the next mating.
    pub fn set_fitness(&mut self, fitness: Vec<f64>) -> Result<(), Error> {
        if fitness.len() != self.pop_size() {
            return Err(Error::SizeMismatch {
                expected: self.pop_size(),
                found: fitness.len(),
            });
        }
        if let Some(&bad) = fitness.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::InvalidFitness(bad));
        }
        self.fitness = Some(fitness);
        Ok(())
    }

    pub fn fitness(&self) -> Option<&[f64]> {
        self.fitness.as_deref()
    }

    pub fn take_fitness(&mut self) -> Option<Vec<f64>> {
        self.fitness.take()
    }

    /// Install an offspring generation.
    ///
    /// Pending fitness values refer to the parents and are dropped.
    pub fn replace_offspring(
        &mut self,
        individuals: Vec<Individual>,
        subpop_sizes: Vec<usize>,
    ) -> Result<(), Error> {
        if subpop_sizes.is_empty() {
            return Err(Error::NoSubpopulations);
        }
        let expected: usize = subpop_sizes.iter().sum();
        if expected != individuals.len() {
            return Err(Error::SizeMismatch {
                expected,
                found: individuals.len(),
            });
        }
        let genotype_len = self.structure.genotype_len();
        if let Some(bad) = individuals
            .iter()
            .find(|i| i.genotype().len() != genotype_len)
        {
            return Err(Error::SizeMismatch {
                expected: genotype_len,
                found: bad.genotype().len(),
            });
        }
        self.individuals = individuals;
        self.subpop_sizes = subpop_sizes;
        self.fitness = None;
        Ok(())
    }
}
