use rand::RngCore;
use replisim_core::Population;

use crate::{Action, Applicability, Operator, ReplisimError};

pub type Condition = Box<dyn Fn(&Population) -> bool + Send + Sync>;

/// Stop evolution when a condition on the population holds.
///
/// By default only the replicate in which the condition is met stops.
/// With [`stop_all`](TerminateIf::stop_all) every replicate stops.
///
/// # Examples
///
/// ```
/// use replisim::{LocusId, TerminateIf};
///
/// // stop once allele 0 is lost or fixed in 100 diploids
/// let t = TerminateIf::new(|pop| {
///     matches!(pop.vars().allele_num(LocusId::from(0), 0), Some(0) | Some(200))
/// })
/// .stop_all(true)
/// .message("allele 0 lost or fixed");
/// ```
pub struct TerminateIf {
    condition: Condition,
    stop_all: bool,
    message: Option<String>,
    applicability: Applicability,
}

impl TerminateIf {
    pub fn new<F>(condition: F) -> Self
    where
        F: Fn(&Population) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Box::new(condition),
            stop_all: false,
            message: None,
            applicability: Applicability::default(),
        }
    }

    pub fn stop_all(mut self, stop_all: bool) -> Self {
        self.stop_all = stop_all;
        self
    }

    /// Logged when the condition is met.
    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

impl std::fmt::Debug for TerminateIf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminateIf")
            .field("stop_all", &self.stop_all)
            .field("message", &self.message)
            .field("applicability", &self.applicability)
            .finish_non_exhaustive()
    }
}

impl Operator for TerminateIf {
    fn name(&self) -> &str {
        "TerminateIf"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        _rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        if !(self.condition)(pop) {
            return Ok(Action::Continue);
        }
        if let Some(message) = &self.message {
            tracing::info!(generation = %pop.generation(), "{}", message);
        }
        if self.stop_all {
            Ok(Action::StopAll)
        } else {
            Ok(Action::StopReplicate)
        }
    }
}
