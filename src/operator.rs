use rand::RngCore;
use replisim_core::{Generation, Population, ReplicateId};

use crate::ReplisimError;

/// What the simulator should do after an operator is applied.
///
/// Variants are ordered by severity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    /// Keep evolving.
    Continue,
    /// Stop evolving the current replicate.
    StopReplicate,
    /// Stop evolving every replicate.
    StopAll,
}

/// An operation applied to a population at selected generations.
pub trait Operator {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// When and to which replicates the operator applies.
    fn applicability(&self) -> &Applicability;

    fn apply(
        &mut self,
        pop: &mut Population,
        rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError>;
}

/// Generations and replicates at which an operator is active.
///
/// Negative values count back from the last generation
/// of a run: `-1` is the last generation, `-2` the one before it.
/// They can only be used when the number of generations is known.
///
/// # Examples
///
/// ```
/// use replisim::{Applicability, Generation, ReplicateId};
///
/// let a = Applicability::new().begin(10).step(5);
/// let rep = ReplicateId::from(0);
/// assert!(!a.is_active(rep, Generation::from(5_u64), None));
/// assert!(a.is_active(rep, Generation::from(15_u64), None));
/// assert!(!a.is_active(rep, Generation::from(16_u64), None));
///
/// let last = Applicability::new().at(&[-1]);
/// assert!(last.is_active(rep, Generation::from(99_u64), Some(Generation::from(99_u64))));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applicability {
    begin: i64,
    end: i64,
    step: u64,
    at: Vec<i64>,
    reps: Option<Vec<ReplicateId>>,
}

impl Default for Applicability {
    fn default() -> Self {
        Self {
            begin: 0,
            end: -1,
            step: 1,
            at: vec![],
            reps: None,
        }
    }
}

impl Applicability {
    /// Active at every generation, for every replicate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(mut self, begin: i64) -> Self {
        self.begin = begin;
        self
    }

    pub fn end(mut self, end: i64) -> Self {
        self.end = end;
        self
    }

    pub fn step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Only at these generations. Overrides begin, end and step.
    pub fn at(mut self, at: &[i64]) -> Self {
        self.at = at.to_vec();
        self
    }

    pub fn reps(mut self, reps: &[ReplicateId]) -> Self {
        self.reps = Some(reps.to_vec());
        self
    }

    /// Check the parameters for a run that does (`has_end`) or does not
    /// have a fixed number of generations.
    pub fn validate(&self, has_end: bool) -> Result<(), ReplisimError> {
        if self.step == 0 {
            return Err(ReplisimError::InvalidParameter(
                "step must be at least 1".to_string(),
            ));
        }
        if !has_end && (self.begin < 0 || self.end < -1 || self.at.iter().any(|&g| g < 0)) {
            return Err(ReplisimError::NegativeGenerationWithoutEnd);
        }
        Ok(())
    }

    pub fn applies_to_replicate(&self, rep: ReplicateId) -> bool {
        match &self.reps {
            Some(reps) => reps.contains(&rep),
            None => true,
        }
    }

    /// Whether the operator fires at `gen` of replicate `rep`,
    /// `last` being the final generation of the run, if known.
    pub fn is_active(&self, rep: ReplicateId, gen: Generation, last: Option<Generation>) -> bool {
        if !self.applies_to_replicate(rep) {
            return false;
        }
        let gen = gen.raw();
        if !self.at.is_empty() {
            return self
                .at
                .iter()
                .any(|&g| resolve(g, last) == Some(gen));
        }
        let Some(begin) = resolve(self.begin, last) else {
            return false;
        };
        if gen < begin {
            return false;
        }
        if self.end != -1 || last.is_some() {
            match resolve(self.end, last) {
                Some(end) if gen <= end => (),
                _ => return false,
            }
        }
        (gen - begin) % self.step.max(1) == 0
    }
}

fn resolve(g: i64, last: Option<Generation>) -> Option<u64> {
    if g >= 0 {
        return Some(g as u64);
    }
    let last = last?.raw() as i64;
    u64::try_from(last + 1 + g).ok()
}
