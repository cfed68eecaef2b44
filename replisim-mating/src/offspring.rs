use rand::Rng;
use replisim_core::{GenoStructure, Individual, Sex};

/// Pick which homologous copy a parent transmits.
fn mendel<T: Rng>(rng: &mut T) -> usize {
    let x: f64 = rng.gen();
    if x < 0.5 {
        1
    } else {
        0
    }
}

/// A diploid offspring. Copy 0 comes from `dad`, copy 1 from `mom`.
/// Chromosomes assort independently and do not recombine.
pub(crate) fn mendelian_offspring<T: Rng>(
    structure: &GenoStructure,
    dad: &Individual,
    mom: &Individual,
    rng: &mut T,
) -> Individual {
    let mut child = Individual::new(structure);
    for ch in 0..structure.num_chromosomes() {
        let Some(range) = structure.chromosome_range(ch) else {
            continue;
        };
        let from_dad = mendel(rng);
        child.copy_mut(0)[range.clone()].copy_from_slice(&dad.copy(from_dad)[range.clone()]);
        let from_mom = mendel(rng);
        child.copy_mut(1)[range.clone()].copy_from_slice(&mom.copy(from_mom)[range]);
    }
    child.set_sex(rng.gen::<Sex>());
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use replisim_core::LocusId;

    #[test]
    fn test_inherits_one_copy_per_parent() {
        let s = GenoStructure::new(2, &[2, 1]).unwrap();
        let mut dad = Individual::new(&s);
        dad.copy_mut(0).copy_from_slice(&[1, 1, 1]);
        dad.copy_mut(1).copy_from_slice(&[2, 2, 2]);
        let mut mom = Individual::new(&s);
        mom.copy_mut(0).copy_from_slice(&[3, 3, 3]);
        mom.copy_mut(1).copy_from_slice(&[4, 4, 4]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let child = mendelian_offspring(&s, &dad, &mom, &mut rng);
            // loci on one chromosome travel together
            assert_eq!(
                child.allele(0, LocusId::from(0)),
                child.allele(0, LocusId::from(1))
            );
            assert!(child.copy(0).iter().all(|&a| a == 1 || a == 2));
            assert!(child.copy(1).iter().all(|&a| a == 3 || a == 4));
        }
    }
}
