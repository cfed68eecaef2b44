use rand::distributions::{Bernoulli, Distribution, Standard};
use rand::prelude::Rng;

use crate::Sex;

/// Samples [`Sex`] with a given probability of being male.
///
/// ```
/// use rand::SeedableRng;
/// use rand::Rng;
/// use replisim_core::{Sex, SexRatio};
///
/// let ratio = SexRatio::new(1.0).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// assert_eq!(rng.sample(ratio), Sex::Male);
/// assert!(SexRatio::new(1.5).is_none());
/// ```
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct SexRatio(Bernoulli);

impl SexRatio {
    /// # Returns
    ///
    /// * `Some` if `male_freq` is within `[0, 1]`
    /// * `None` otherwise
    pub fn new(male_freq: f64) -> Option<Self> {
        if !male_freq.is_finite() {
            return None;
        }
        Bernoulli::new(male_freq).ok().map(Self)
    }

    /// Males and females with equal probability.
    pub fn even() -> Self {
        Self(Bernoulli::from_ratio(1, 2).expect("1/2 is a valid probability"))
    }
}

impl Distribution<Sex> for SexRatio {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sex {
        if self.0.sample(rng) {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

impl Distribution<Sex> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sex {
        if rng.gen::<bool>() {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}
