//! Operators that set up the initial state of a population.

use rand::{Rng, RngCore};
use rand_distr::WeightedAliasIndex;
use replisim_core::{Allele, LocusId, Population, SexRatio};

use crate::{Action, Applicability, Operator, ReplisimError};

/// Selected loci, or all loci when `loci` is `None`.
fn selected_loci(
    pop: &Population,
    loci: Option<&[LocusId]>,
) -> Result<Vec<LocusId>, ReplisimError> {
    let total = pop.structure().total_loci();
    match loci {
        None => Ok((0..total).map(LocusId::from).collect()),
        Some(loci) => {
            if let Some(&locus) = loci.iter().find(|&&l| l >= total) {
                return Err(ReplisimError::LocusOutOfRange { locus, total });
            }
            Ok(loci.to_vec())
        }
    }
}

/// Assign a random sex to every individual.
#[derive(Debug)]
pub struct InitSex {
    ratio: SexRatio,
    applicability: Applicability,
}

impl Default for InitSex {
    fn default() -> Self {
        Self {
            ratio: SexRatio::even(),
            applicability: Applicability::default(),
        }
    }
}

impl InitSex {
    /// Males and females with equal probability.
    pub fn new() -> Self {
        Self::default()
    }

    /// # Returns
    ///
    /// `None` unless `male_freq` is within `[0, 1]`.
    pub fn with_male_freq(male_freq: f64) -> Option<Self> {
        Some(Self {
            ratio: SexRatio::new(male_freq)?,
            applicability: Applicability::default(),
        })
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

impl Operator for InitSex {
    fn name(&self) -> &str {
        "InitSex"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        for ind in pop.individuals_mut() {
            ind.set_sex(rng.sample(self.ratio));
        }
        Ok(Action::Continue)
    }
}

/// Draw every allele copy at the selected loci independently
/// from a frequency vector indexed by allele.
#[derive(Debug)]
pub struct InitByFreq {
    allele_freq: Vec<f64>,
    lookup: WeightedAliasIndex<f64>,
    loci: Option<Vec<LocusId>>,
    applicability: Applicability,
}

impl InitByFreq {
    /// # Returns
    ///
    /// `None` if a frequency is negative or not finite, if they do not
    /// sum to one, or if there are more frequencies than alleles.
    ///
    /// ```
    /// # use replisim::InitByFreq;
    /// assert!(InitByFreq::new(&[0.3, 0.7]).is_some());
    /// assert!(InitByFreq::new(&[0.3, 0.6]).is_none());
    /// assert!(InitByFreq::new(&[-0.3, 1.3]).is_none());
    /// assert!(InitByFreq::new(&[]).is_none());
    /// ```
    pub fn new(allele_freq: &[f64]) -> Option<Self> {
        if allele_freq.is_empty() || allele_freq.len() > usize::from(Allele::MAX) + 1 {
            return None;
        }
        if allele_freq.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return None;
        }
        let sum: f64 = allele_freq.iter().sum();
        if (sum - 1.0).abs() > 1e-7 {
            return None;
        }
        let lookup = WeightedAliasIndex::new(allele_freq.to_vec()).ok()?;
        Some(Self {
            allele_freq: allele_freq.to_vec(),
            lookup,
            loci: None,
            applicability: Applicability::default(),
        })
    }

    pub fn loci(mut self, loci: &[LocusId]) -> Self {
        self.loci = Some(loci.to_vec());
        self
    }

    pub fn allele_freq(&self) -> &[f64] {
        &self.allele_freq
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

impl Operator for InitByFreq {
    fn name(&self) -> &str {
        "InitByFreq"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        let loci = selected_loci(pop, self.loci.as_deref())?;
        let ploidy = pop.ploidy();
        for ind in pop.individuals_mut() {
            for copy in 0..ploidy {
                for &locus in &loci {
                    // at most 256 frequencies, so the index fits
                    let allele = rng.sample(&self.lookup) as Allele;
                    ind.set_allele(copy, locus, allele);
                }
            }
        }
        Ok(Action::Continue)
    }
}

/// Set every allele copy at the selected loci to fixed values.
///
/// A single value is used for all loci; otherwise there must be
/// one value per selected locus.
#[derive(Debug)]
pub struct InitByValue {
    value: Vec<Allele>,
    loci: Option<Vec<LocusId>>,
    applicability: Applicability,
}

impl InitByValue {
    pub fn new(value: &[Allele]) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value: value.to_vec(),
            loci: None,
            applicability: Applicability::default(),
        })
    }

    pub fn loci(mut self, loci: &[LocusId]) -> Self {
        self.loci = Some(loci.to_vec());
        self
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

impl Operator for InitByValue {
    fn name(&self) -> &str {
        "InitByValue"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn apply(
        &mut self,
        pop: &mut Population,
        _rng: &mut dyn RngCore,
    ) -> Result<Action, ReplisimError> {
        let loci = selected_loci(pop, self.loci.as_deref())?;
        if self.value.len() != 1 && self.value.len() != loci.len() {
            return Err(ReplisimError::InvalidParameter(format!(
                "{} values given for {} loci",
                self.value.len(),
                loci.len()
            )));
        }
        let ploidy = pop.ploidy();
        for ind in pop.individuals_mut() {
            for copy in 0..ploidy {
                for (i, &locus) in loci.iter().enumerate() {
                    let allele = if self.value.len() == 1 {
                        self.value[0]
                    } else {
                        self.value[i]
                    };
                    ind.set_allele(copy, locus, allele);
                }
            }
        }
        Ok(Action::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use replisim_core::GenoStructure;

    fn pop() -> Population {
        Population::new(&[500], GenoStructure::new(2, &[2]).unwrap()).unwrap()
    }

    #[test]
    fn test_init_sex_frequency() {
        let mut p = pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        InitSex::new().apply(&mut p, &mut rng).unwrap();
        let males = p.individuals().iter().filter(|i| i.sex().is_male()).count();
        assert!(males > 200 && males < 300);

        let mut op = InitSex::with_male_freq(0.0).unwrap();
        op.apply(&mut p, &mut rng).unwrap();
        assert!(p.individuals().iter().all(|i| i.sex().is_female()));
        assert!(InitSex::with_male_freq(2.0).is_none());
    }

    #[test]
    fn test_init_by_freq() {
        let mut p = pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let mut op = InitByFreq::new(&[0.3, 0.7])
            .unwrap()
            .loci(&[LocusId::from(0)]);
        op.apply(&mut p, &mut rng).unwrap();
        let zeros = p
            .individuals()
            .iter()
            .map(|i| (0..2).filter(|&c| i.allele(c, LocusId::from(0)) == 0).count())
            .sum::<usize>();
        // 1000 copies, expected 300
        assert!(zeros > 240 && zeros < 360);
        // locus 1 untouched
        assert!(p
            .individuals()
            .iter()
            .all(|i| i.allele(0, LocusId::from(1)) == 0 && i.allele(1, LocusId::from(1)) == 0));
    }

    #[test]
    fn test_init_by_freq_locus_out_of_range() {
        let mut p = pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let mut op = InitByFreq::new(&[1.0]).unwrap().loci(&[LocusId::from(2)]);
        assert_eq!(
            op.apply(&mut p, &mut rng),
            Err(ReplisimError::LocusOutOfRange {
                locus: LocusId::from(2),
                total: 2
            })
        );
    }

    #[test]
    fn test_init_by_value() {
        let mut p = pop();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        InitByValue::new(&[4, 5])
            .unwrap()
            .apply(&mut p, &mut rng)
            .unwrap();
        for ind in p.individuals() {
            assert_eq!(ind.copy(0), &[4, 5]);
            assert_eq!(ind.copy(1), &[4, 5]);
        }
        let mut bad = InitByValue::new(&[1, 2, 3]).unwrap();
        assert!(matches!(
            bad.apply(&mut p, &mut rng),
            Err(ReplisimError::InvalidParameter(_))
        ));
        assert!(InitByValue::new(&[]).is_none());
    }
}
