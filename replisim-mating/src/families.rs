use rand::Rng;
use replisim_core::Individual;

use crate::num_offspring::FamilySizes;

/// Consecutive empty families after which a subpopulation is
/// considered unable to produce offspring.
pub(crate) const MAX_EMPTY_FAMILIES: usize = 100_000;

/// Append `target` offspring to `offspring`, one family at a time.
///
/// The last family is truncated so that exactly `target`
/// individuals are produced.
///
/// # Returns
///
/// The number of non-empty families, or `None` after
/// [`MAX_EMPTY_FAMILIES`] empty families in a row.
pub(crate) fn fill_families<T, P, C, O>(
    target: usize,
    sizes: &FamilySizes,
    rng: &mut T,
    mut choose_parents: C,
    mut make_offspring: O,
    offspring: &mut Vec<Individual>,
) -> Option<usize>
where
    T: Rng,
    C: FnMut(&mut T) -> P,
    O: FnMut(&P, &mut T) -> Individual,
{
    let mut produced = 0;
    let mut families = 0;
    let mut empty = 0;
    while produced < target {
        let n = sizes.sample(rng).min(target - produced);
        if n == 0 {
            empty += 1;
            if empty >= MAX_EMPTY_FAMILIES {
                return None;
            }
            continue;
        }
        empty = 0;
        let parents = choose_parents(rng);
        for _ in 0..n {
            offspring.push(make_offspring(&parents, rng));
        }
        produced += n;
        families += 1;
    }
    Some(families)
}
