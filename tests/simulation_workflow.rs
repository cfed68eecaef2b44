use replisim::prelude::*;

fn allele_count(pop: &mut Population, locus: usize, allele: u8) -> u64 {
    let locus = LocusId::from(locus);
    stat(pop, &StatSpec::new().allele_freq(&[locus])).unwrap();
    pop.vars().allele_num(locus, allele).unwrap()
}

#[test]
fn test_lethal_genotypes_are_purged() {
    let pop = Population::new(&[100], GenoStructure::new(2, &[1]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 3, 8).unwrap();
    simu.evolve(
        EvolutionParams::new(RandomMating::new())
            .init_ops(vec![
                Box::new(InitSex::new()),
                Box::new(InitByFreq::new(&[0.3, 0.7]).unwrap()),
            ])
            .pre_ops(vec![Box::new(
                MapSelector::new(LocusId::from(0), &[((0, 0), 0.0), ((0, 1), 0.0)]).unwrap(),
            )])
            .gen(1),
    )
    .unwrap();
    for pop in simu.populations_mut() {
        assert_eq!(allele_count(pop, 0, 0), 0);
        assert_eq!(pop.pop_size(), 100);
    }
}

#[test]
fn test_haploid_binomial_selection_with_growth() {
    let pop = Population::new(&[10, 10], GenoStructure::new(1, &[3]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 2, 5).unwrap();
    let gens = simu
        .evolve(
            EvolutionParams::new(BinomialSelection::new().with_subpop_sizes(
                SubPopSizes::Function(Box::new(|_gen: Generation, sizes: &[usize]| {
                    sizes.iter().map(|s| s + 5).collect()
                })),
            ))
            .init_ops(vec![Box::new(InitByValue::new(&[1, 2, 3]).unwrap())])
            .post_ops(vec![Box::new(Stat::new(StatSpec::new().pop_size(true)))])
            .gen(4),
        )
        .unwrap();
    assert_eq!(gens, vec![4, 4]);
    for pop in simu.populations_mut() {
        assert_eq!(pop.subpop_sizes(), &[30, 30]);
        assert_eq!(pop.vars().pop_size(), Some(60));
        assert_eq!(allele_count(pop, 2, 3), 60);
    }
}

#[test]
fn test_random_mating_rejects_haploids() {
    let pop = Population::new(&[10], GenoStructure::new(1, &[1]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 2, 5).unwrap();
    let r = simu.evolve(EvolutionParams::new(RandomMating::new()).gen(1));
    assert!(matches!(
        r,
        Err(ReplisimError::MatingError {
            value: replisim::MatingError::IncompatiblePloidy { .. },
            ..
        })
    ));
}

#[test]
fn test_uni_sex_failure_names_replicate() {
    let pop = Population::new(&[10], GenoStructure::new(2, &[1]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 2, 5).unwrap();
    let r = simu.evolve(
        EvolutionParams::new(RandomMating::new().cont_when_uni_sex(false))
            .init_ops(vec![Box::new(InitSex::with_male_freq(1.0).unwrap())])
            .gen(1),
    );
    assert_eq!(
        r,
        Err(ReplisimError::MatingError {
            replicate: ReplicateId::from(0),
            value: replisim::MatingError::UniSex {
                subpop: SubPopId::from(0)
            },
        })
    );
}

#[test]
fn test_stat_every_other_generation() {
    let pop = Population::new(&[20], GenoStructure::new(2, &[1]).unwrap()).unwrap();
    let mut simu = Simulator::new(pop, 1, 3).unwrap();
    // generations 1, 3, 5 are the only ones a stop can come from
    let gens = simu
        .evolve(
            EvolutionParams::new(NoMating::new()).post_ops(vec![Box::new(
                TerminateIf::new(|p| p.generation() >= 4_u64)
                    .with_applicability(Applicability::new().begin(1).step(2)),
            )]),
        )
        .unwrap();
    assert_eq!(gens, vec![6]);
}
