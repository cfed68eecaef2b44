//! Export commonly-used types and traits

pub use crate::{
    stat, Action, Applicability, EvolutionParams, InitByFreq, InitByValue, InitSex, MapSelector,
    Operator, ReplisimError, Simulator, Stat, StatSpec, TerminateIf,
};
pub use replisim_core::{GenoStructure, Generation, LocusId, Population, ReplicateId, Sex, SubPopId};
pub use replisim_mating::{BinomialSelection, MatingScheme, NoMating, NumOffspring, RandomMating, SubPopSizes};
