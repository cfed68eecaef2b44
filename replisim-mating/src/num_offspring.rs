use std::sync::Arc;

use rand::Rng;
use rand_distr::{Binomial, Geometric, Poisson, Uniform};
use replisim_core::Generation;

/// Family size as a function of the parental generation.
pub type NumOffspringFn = Arc<dyn Fn(Generation) -> usize + Send + Sync>;

/// Number of offspring produced by each mating event.
///
/// Use the constructors to validate parameters.
/// A sampler that could only ever produce empty families is rejected.
/// Distributions that mostly produce empty families are accepted but
/// slow, and mating gives up after a long run of empty families.
#[derive(Clone)]
#[non_exhaustive]
pub enum NumOffspring {
    /// Every family has this size.
    Fixed(usize),
    /// Number of trials up to and including the first success.
    Geometric(f64),
    /// Poisson distributed. Empty families are skipped.
    Poisson(f64),
    /// Binomial with `max` trials. Empty families are skipped.
    Binomial { p: f64, max: u64 },
    /// Uniform on `min..=max`.
    Uniform { min: usize, max: usize },
    /// Called once per generation. All families of that generation
    /// have the returned size, which must not be zero.
    PerGeneration(NumOffspringFn),
    /// Called once for each family. Empty families are skipped.
    PerFamily(NumOffspringFn),
}

impl Default for NumOffspring {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl std::fmt::Debug for NumOffspring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Self::Geometric(p) => f.debug_tuple("Geometric").field(p).finish(),
            Self::Poisson(mean) => f.debug_tuple("Poisson").field(mean).finish(),
            Self::Binomial { p, max } => f
                .debug_struct("Binomial")
                .field("p", p)
                .field("max", max)
                .finish(),
            Self::Uniform { min, max } => f
                .debug_struct("Uniform")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::PerGeneration(_) => write!(f, "PerGeneration(..)"),
            Self::PerFamily(_) => write!(f, "PerFamily(..)"),
        }
    }
}

impl NumOffspring {
    pub fn fixed(n: usize) -> Option<Self> {
        if n > 0 {
            Some(Self::Fixed(n))
        } else {
            None
        }
    }

    /// # Returns
    ///
    /// `None` unless `0 < p <= 1` and `1 - p` is distinguishable from 1.
    pub fn geometric(p: f64) -> Option<Self> {
        if p.is_finite() && p > 0.0 && p <= 1.0 && 1.0 - p != 1.0 {
            Some(Self::Geometric(p))
        } else {
            None
        }
    }

    pub fn poisson(mean: f64) -> Option<Self> {
        if mean.is_finite() && mean > 0.0 {
            Some(Self::Poisson(mean))
        } else {
            None
        }
    }

    pub fn binomial(p: f64, max: u64) -> Option<Self> {
        if p.is_finite() && p > 0.0 && p <= 1.0 && max > 0 {
            Some(Self::Binomial { p, max })
        } else {
            None
        }
    }

    pub fn uniform(min: usize, max: usize) -> Option<Self> {
        if max > 0 && min <= max {
            Some(Self::Uniform { min, max })
        } else {
            None
        }
    }

    /// ```
    /// use replisim_mating::NumOffspring;
    ///
    /// // two offspring per family during the first 10 generations, then one
    /// let n = NumOffspring::per_generation(|gen| if gen < 10_u64 { 2 } else { 1 });
    /// ```
    pub fn per_generation<F>(f: F) -> Self
    where
        F: Fn(Generation) -> usize + Send + Sync + 'static,
    {
        Self::PerGeneration(Arc::new(f))
    }

    pub fn per_family<F>(f: F) -> Self
    where
        F: Fn(Generation) -> usize + Send + Sync + 'static,
    {
        Self::PerFamily(Arc::new(f))
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Fixed(n) => Self::fixed(*n).is_some(),
            Self::Geometric(p) => Self::geometric(*p).is_some(),
            Self::Poisson(mean) => Self::poisson(*mean).is_some(),
            Self::Binomial { p, max } => Self::binomial(*p, *max).is_some(),
            Self::Uniform { min, max } => Self::uniform(*min, *max).is_some(),
            Self::PerGeneration(_) | Self::PerFamily(_) => true,
        }
    }
}

pub(crate) enum FamilySizes {
    Fixed(usize),
    Geometric(Geometric),
    Poisson(Poisson<f64>),
    Binomial(Binomial),
    Uniform(Uniform<usize>),
    PerFamily {
        f: NumOffspringFn,
        generation: Generation,
    },
}

impl FamilySizes {
    /// Sampler for the offspring of parental generation `generation`.
    pub(crate) fn new(num_offspring: &NumOffspring, generation: Generation) -> Option<Self> {
        if !num_offspring.is_valid() {
            return None;
        }
        let sizes = match num_offspring {
            NumOffspring::Fixed(n) => Self::Fixed(*n),
            NumOffspring::Geometric(p) => Self::Geometric(Geometric::new(*p).ok()?),
            NumOffspring::Poisson(mean) => Self::Poisson(Poisson::new(*mean).ok()?),
            NumOffspring::Binomial { p, max } => Self::Binomial(Binomial::new(*max, *p).ok()?),
            NumOffspring::Uniform { min, max } => {
                Self::Uniform(Uniform::new_inclusive(*min, *max))
            }
            NumOffspring::PerGeneration(f) => match f(generation) {
                0 => return None,
                n => Self::Fixed(n),
            },
            NumOffspring::PerFamily(f) => Self::PerFamily {
                f: Arc::clone(f),
                generation,
            },
        };
        Some(sizes)
    }

    pub(crate) fn sample<T: Rng>(&self, rng: &mut T) -> usize {
        match self {
            Self::Fixed(n) => *n,
            // rand_distr counts failures before the first success
            Self::Geometric(g) => rng.sample(g) as usize + 1,
            Self::Poisson(p) => rng.sample(p) as usize,
            Self::Binomial(b) => rng.sample(b) as usize,
            Self::Uniform(u) => rng.sample(u),
            Self::PerFamily { f, generation } => f(*generation),
        }
    }
}
