use std::collections::BTreeMap;

use crate::Allele;
use crate::LocusId;

/// Statistics attached to a population.
///
/// Values are written by statistics operators and read by
/// conditions such as terminators. Loci that were never
/// counted have no entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopVars {
    allele_num: BTreeMap<LocusId, Vec<u64>>,
    allele_freq: BTreeMap<LocusId, Vec<f64>>,
    heterozygote_freq: BTreeMap<LocusId, f64>,
    pop_size: Option<usize>,
    subpop_sizes: Option<Vec<usize>>,
}

impl PopVars {
    /// Number of copies of `allele` at `locus`.
    ///
    /// # Returns
    ///
    /// * `None` if `locus` has not been counted.
    /// * `Some(0)` for alleles never observed at a counted locus.
    ///
    /// ```
    /// # use replisim_core::{LocusId, PopVars};
    /// let mut vars = PopVars::default();
    /// vars.set_allele_counts(LocusId::from(0), vec![3, 1]);
    /// assert_eq!(vars.allele_num(LocusId::from(0), 1), Some(1));
    /// assert_eq!(vars.allele_num(LocusId::from(0), 5), Some(0));
    /// assert_eq!(vars.allele_num(LocusId::from(1), 0), None);
    /// assert_eq!(vars.allele_freq(LocusId::from(0), 0), Some(0.75));
    /// ```
    pub fn allele_num(&self, locus: LocusId, allele: Allele) -> Option<u64> {
        self.allele_num
            .get(&locus)
            .map(|counts| counts.get(allele as usize).copied().unwrap_or(0))
    }

    pub fn allele_freq(&self, locus: LocusId, allele: Allele) -> Option<f64> {
        self.allele_freq
            .get(&locus)
            .map(|freqs| freqs.get(allele as usize).copied().unwrap_or(0.0))
    }

    /// Counts of all alleles at `locus`, indexed by allele.
    pub fn allele_counts(&self, locus: LocusId) -> Option<&[u64]> {
        self.allele_num.get(&locus).map(|v| v.as_slice())
    }

    /// Frequencies of all alleles at `locus`, indexed by allele.
    pub fn allele_freqs(&self, locus: LocusId) -> Option<&[f64]> {
        self.allele_freq.get(&locus).map(|v| v.as_slice())
    }

    /// Store counts for a locus and derive frequencies from them.
    pub fn set_allele_counts(&mut self, locus: LocusId, counts: Vec<u64>) {
        let total: u64 = counts.iter().sum();
        let freqs = if total == 0 {
            vec![0.0; counts.len()]
        } else {
            counts.iter().map(|&c| c as f64 / total as f64).collect()
        };
        self.allele_num.insert(locus, counts);
        self.allele_freq.insert(locus, freqs);
    }

    pub fn heterozygote_freq(&self, locus: LocusId) -> Option<f64> {
        self.heterozygote_freq.get(&locus).copied()
    }

    pub fn set_heterozygote_freq(&mut self, locus: LocusId, freq: f64) {
        self.heterozygote_freq.insert(locus, freq);
    }

    pub fn pop_size(&self) -> Option<usize> {
        self.pop_size
    }

    pub fn subpop_sizes(&self) -> Option<&[usize]> {
        self.subpop_sizes.as_deref()
    }

    pub fn set_pop_size(&mut self, subpop_sizes: &[usize]) {
        self.pop_size = Some(subpop_sizes.iter().sum());
        self.subpop_sizes = Some(subpop_sizes.to_vec());
    }

    /// Whether `locus` has a single allele left.
    pub fn is_fixed(&self, locus: LocusId) -> Option<bool> {
        self.allele_num
            .get(&locus)
            .map(|counts| counts.iter().filter(|&&c| c > 0).count() <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts() {
        let mut vars = PopVars::default();
        vars.set_allele_counts(LocusId::from(2), vec![0, 0]);
        assert_eq!(vars.allele_freqs(LocusId::from(2)), Some(&[0.0, 0.0][..]));
        assert_eq!(vars.is_fixed(LocusId::from(2)), Some(true));
    }

    #[test]
    fn test_fixation() {
        let mut vars = PopVars::default();
        vars.set_allele_counts(LocusId::from(0), vec![0, 200]);
        assert_eq!(vars.is_fixed(LocusId::from(0)), Some(true));
        vars.set_allele_counts(LocusId::from(0), vec![1, 199]);
        assert_eq!(vars.is_fixed(LocusId::from(0)), Some(false));
        assert_eq!(vars.is_fixed(LocusId::from(1)), None);
    }

    #[test]
    fn test_pop_size() {
        let mut vars = PopVars::default();
        vars.set_pop_size(&[10, 20]);
        assert_eq!(vars.pop_size(), Some(30));
        assert_eq!(vars.subpop_sizes(), Some(&[10, 20][..]));
    }
}
