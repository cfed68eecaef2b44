//! Error handling
use replisim_core::{LocusId, ReplicateId};
use replisim_mating::MatingError;
use thiserror::Error;

/// Primary error type.
///
/// Some members of this enum implement ``From``
/// in order to redirect other error types.
#[derive(Error, Debug, PartialEq)]
pub enum ReplisimError {
    /// A parameter of an operator or simulator is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An operator refers to a locus the population does not have.
    #[error("locus {locus} out of range, population has {total} loci")]
    LocusOutOfRange {
        /// The requested locus
        locus: LocusId,
        /// Number of loci in the population
        total: usize,
    },
    /// Generations counted from the end require a finite run.
    #[error("negative generation indexes require a fixed number of generations")]
    NegativeGenerationWithoutEnd,
    /// A simulator needs at least one replicate.
    #[error("a simulator needs at least one replicate")]
    NoReplicates,
    /// A redirection of a [``replisim_core::Error``]
    #[error("{value:?}")]
    CoreError {
        /// The redirected error
        #[from]
        value: replisim_core::Error,
    },
    /// Mating failed in a replicate.
    #[error("replicate {replicate}: {value}")]
    MatingError {
        /// The replicate being evolved
        replicate: ReplicateId,
        /// The mating error
        value: MatingError,
    },
}
