use rand::RngCore;
use replisim_core::{LocusId, Population};

use crate::{Action, Applicability, Operator, ReplisimError};

/// Which statistics [`stat`] computes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatSpec {
    pub allele_freq: Vec<LocusId>,
    pub heterozygote_freq: Vec<LocusId>,
    pub pop_size: bool,
}

impl StatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allele_freq(mut self, loci: &[LocusId]) -> Self {
        self.allele_freq = loci.to_vec();
        self
    }

    pub fn heterozygote_freq(mut self, loci: &[LocusId]) -> Self {
        self.heterozygote_freq = loci.to_vec();
        self
    }

    pub fn pop_size(mut self, pop_size: bool) -> Self {
        self.pop_size = pop_size;
        self
    }
}

fn check_locus(pop: &Population, locus: LocusId) -> Result<(), ReplisimError> {
    if pop.structure().contains(locus) {
        Ok(())
    } else {
        Err(ReplisimError::LocusOutOfRange {
            locus,
            total: pop.structure().total_loci(),
        })
    }
}

/// Count every allele copy at `locus`.
fn allele_counts(pop: &Population, locus: LocusId) -> Vec<u64> {
    let mut counts = vec![];
    for ind in pop.individuals() {
        for copy in 0..pop.ploidy() {
            let a = usize::from(ind.allele(copy, locus));
            if a >= counts.len() {
                counts.resize(a + 1, 0);
            }
            counts[a] += 1;
        }
    }
    counts
}

/// Compute statistics and store them in
/// [`Population::vars`](replisim_core::Population::vars).
///
/// # Examples
///
/// ```
/// use replisim::{stat, GenoStructure, LocusId, Population, StatSpec};
///
/// let mut pop = Population::new(&[10], GenoStructure::new(2, &[1]).unwrap()).unwrap();
/// pop.individuals_mut()[0].set_allele(0, LocusId::from(0), 1);
/// stat(&mut pop, &StatSpec::new().allele_freq(&[LocusId::from(0)])).unwrap();
/// assert_eq!(pop.vars().allele_num(LocusId::from(0), 0), Some(19));
/// assert_eq!(pop.vars().allele_freq(LocusId::from(0), 1), Some(0.05));
/// ```
pub fn stat(pop: &mut Population, spec: &StatSpec) -> Result<(), ReplisimError> {
    for &locus in spec.allele_freq.iter().chain(spec.heterozygote_freq.iter()) {
        check_locus(pop, locus)?;
    }
    if !spec.heterozygote_freq.is_empty() && pop.ploidy() != 2 {
        return Err(ReplisimError::InvalidParameter(format!(
            "heterozygote frequency needs a diploid population, ploidy is {}",
            pop.ploidy()
        )));
    }
    for &locus in &spec.allele_freq {
        let counts = allele_counts(pop, locus);
        pop.vars_mut().set_allele_counts(locus, counts);
    }
    for &locus in &spec.heterozygote_freq {
        let heterozygotes = pop
            .individuals()
            .iter()
            .filter(|ind| ind.allele(0, locus) != ind.allele(1, locus))
            .count();
        let freq = if pop.pop_size() == 0 {
            0.0
        } else {
            heterozygotes as f64 / pop.pop_size() as f64
        };
        pop.vars_mut().set_heterozygote_freq(locus, freq);
    }
    if spec.pop_size {
        let sizes = pop.subpop_sizes().to_vec();
        pop.vars_mut().set_pop_size(&sizes);
    }
    Ok(())
}

/// Operator form of [`stat`].
#[derive(Debug)]
pub struct Stat {
    spec: StatSpec,
    applicability: Applicability,
}

impl Stat {
    pub fn new(spec: StatSpec) -> Self {
        Self {
            spec,
            applicability: Applicability::default(),
        }
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

impl Operator for Stat {
    fn name(&self) -> &str {
        "Stat"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        _rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        stat(pop, &self.spec)?;
        Ok(Action::Continue)
    }
}
