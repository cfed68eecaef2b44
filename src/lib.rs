//! Rust library for replicated forward-time population
//! genetic simulation.
//!
//! # Overview
//!
//! A [`Simulator`] holds several replicates of a [`Population`].
//! Each call to [`Simulator::evolve`] applies initialization
//! operators once, then, generation by generation, pre-mating
//! operators, a [`MatingScheme`], and post-mating operators.
//! Operators such as [`TerminateIf`] stop one replicate, or all of
//! them, when a condition over the population statistics holds.
//!
//! # Where to find examples
//!
//! In the `demos/` directory of the project repository.

mod error;
mod initializer;
mod operator;
pub mod prelude;
mod selector;
mod simulator;
mod statistics;
mod terminator;

pub use error::ReplisimError;
pub use initializer::{InitByFreq, InitByValue, InitSex};
pub use operator::{Action, Applicability, Operator};
pub use selector::MapSelector;
pub use simulator::{EvolutionParams, Simulator};
pub use statistics::{stat, Stat, StatSpec};
pub use terminator::{Condition, TerminateIf};

pub use replisim_core::{
    Allele, GenoStructure, Generation, Individual, LocusId, PopVars, Population, ReplicateId, Sex,
    SexRatio, SubPopId,
};
pub use replisim_mating::{
    BinomialSelection, MatingError, MatingScheme, NoMating, NumOffspring, NumOffspringFn,
    RandomMating, SubPopSizeFn, SubPopSizes,
};

/// Get the replisim version number.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
