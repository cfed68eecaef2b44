use replisim_core::SubPopId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MatingError {
    #[error("{scheme} requires ploidy {expected}, population has ploidy {found}")]
    IncompatiblePloidy {
        scheme: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("subpopulation {subpop} has individuals of only one sex")]
    UniSex { subpop: SubPopId },
    #[error("cannot produce offspring from empty subpopulation {subpop}")]
    EmptyParentalSubpop { subpop: SubPopId },
    #[error("expected {expected} subpopulation sizes, found {found}")]
    SubPopSizeCount { expected: usize, found: usize },
    #[error("fitness values in subpopulation {subpop} cannot be used as weights")]
    InvalidFitness { subpop: SubPopId },
    #[error("invalid number of offspring: {0}")]
    InvalidNumOffspring(String),
    #[error("subpopulation {subpop} keeps producing empty families")]
    NoOffspring { subpop: SubPopId },
    /// A redirection of a [``replisim_core::Error``]
    #[error("{value:?}")]
    CoreError {
        #[from]
        value: replisim_core::Error,
    },
}
