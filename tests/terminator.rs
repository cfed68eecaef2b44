use replisim::prelude::*;

fn lost_or_fixed(pop: &Population) -> bool {
    matches!(
        pop.vars().allele_num(LocusId::from(0), 0),
        Some(0) | Some(200)
    )
}

fn run(stop_all: bool, seed: u64) -> (Simulator, Vec<u64>) {
    let pop = Population::new(&[100], GenoStructure::new(2, &[2]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 5, seed).unwrap();
    let init_by_freq = InitByFreq::new(&[0.3, 0.7]).unwrap();
    assert_eq!(init_by_freq.allele_freq(), &[0.3, 0.7]);
    let gens = simu
        .evolve(
            EvolutionParams::new(RandomMating::new())
                .init_ops(vec![
                    Box::new(InitSex::new()),
                    Box::new(init_by_freq),
                ])
                .post_ops(vec![
                    Box::new(Stat::new(
                        StatSpec::new().allele_freq(&[LocusId::from(0)]),
                    )),
                    Box::new(TerminateIf::new(lost_or_fixed).stop_all(stop_all)),
                ]),
        )
        .unwrap();
    (simu, gens)
}

fn is_lost_or_fixed(pop: &mut Population) -> bool {
    stat(pop, &StatSpec::new().allele_freq(&[LocusId::from(0)])).unwrap();
    assert_eq!(pop.vars().is_fixed(LocusId::from(0)), Some(true));
    matches!(
        pop.vars().allele_freq(LocusId::from(0), 0),
        Some(f) if f == 0.0 || f == 1.0
    )
}

#[test]
fn test_terminate_replicate() {
    let (mut simu, gens) = run(false, 101);
    assert_eq!(gens.len(), 5);
    // it is very unlikely that all replicates stop at the same time
    assert!(gens.windows(2).any(|w| w[0] != w[1]));
    for pop in simu.populations_mut() {
        assert!(is_lost_or_fixed(pop));
    }
    for (rep, &g) in gens.iter().enumerate() {
        assert_eq!(simu.generation(rep), Some(Generation::from(g)));
    }
}

#[test]
fn test_terminate_all() {
    for seed in [1, 2, 3] {
        let (mut simu, gens) = run(true, seed);
        // replicates after the one that stopped did not finish the last generation
        assert!(gens.windows(2).all(|w| w[0] >= w[1]));
        assert!(gens[0] - gens[4] <= 1);
        let stopped = (0..4).find(|&rep| gens[rep + 1] < gens[rep]).unwrap_or(4);
        let pop = simu.population_mut(stopped).unwrap();
        assert!(is_lost_or_fixed(pop));
    }
}

#[test]
fn test_terminate_all_is_reproducible() {
    let (_, a) = run(true, 17);
    let (_, b) = run(true, 17);
    assert_eq!(a, b);
}
