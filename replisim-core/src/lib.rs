//! Core types for replicated forward-time simulation:
//! index newtypes, genotype layout, individuals and populations.

use thiserror::Error;

mod macros;

mod generation;
mod genotype;
pub mod newtypes;
mod population;
#[cfg(feature = "rand")]
mod rand_sex;
mod sex;
mod vars;

pub use generation::Generation;
pub use genotype::{Allele, GenoStructure, Individual};
pub use newtypes::{LocusId, ReplicateId, SubPopId};
pub use population::Population;
#[cfg(feature = "rand")]
pub use rand_sex::SexRatio;
pub use sex::Sex;
pub use vars::PopVars;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("ploidy must be 1 or 2, got {0}")]
    InvalidPloidy(usize),
    #[error("chromosome {0} has no loci")]
    EmptyChromosome(usize),
    #[error("a population needs at least one subpopulation")]
    NoSubpopulations,
    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("invalid fitness value {0:?}")]
    InvalidFitness(f64),
}
