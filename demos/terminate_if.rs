use clap::Parser;
use replisim::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Evolve replicates under random mating until an allele is lost or fixed.
#[derive(Parser, Debug)]
#[command(name = "terminate_if")]
struct Args {
    /// Diploid population size
    #[arg(short = 'N', long, default_value_t = 100)]
    popsize: usize,

    /// Number of loci on each chromosome
    #[arg(short, long, value_delimiter = ',', default_value = "2")]
    loci: Vec<usize>,

    /// Number of replicates
    #[arg(short, long, default_value_t = 5)]
    replicates: usize,

    /// Initial frequency of allele 0 at locus 0
    #[arg(short, long, default_value_t = 0.3)]
    freq: f64,

    /// Stop every replicate as soon as one stops
    #[arg(long)]
    stop_all: bool,

    /// Maximum number of generations
    #[arg(short = 'g', long)]
    max_gen: Option<u64>,

    /// Random number seed
    #[arg(short = 'S', long)]
    seed: u64,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), ReplisimError> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let init_by_freq = InitByFreq::new(&[args.freq, 1.0 - args.freq])
        .ok_or_else(|| ReplisimError::InvalidParameter(format!("bad frequency {}", args.freq)))?;

    tracing::info!(
        freq = ?init_by_freq.allele_freq(),
        replicates = args.replicates,
        "initial allele frequencies at locus 0"
    );

    let pop = Population::new(&[args.popsize], GenoStructure::new(2, &args.loci)?)?;
    let mut simu = Simulator::new(pop, args.replicates, args.seed)?;

    let mut params = EvolutionParams::new(RandomMating::new())
        .init_ops(vec![Box::new(InitSex::new()), Box::new(init_by_freq)])
        .post_ops(vec![
            Box::new(Stat::new(StatSpec::new().allele_freq(&[LocusId::from(0)]))),
            Box::new(
                TerminateIf::new(|pop| pop.vars().is_fixed(LocusId::from(0)) == Some(true))
                .stop_all(args.stop_all)
                .message("allele 0 lost or fixed at locus 0"),
            ),
        ]);
    if let Some(g) = args.max_gen {
        params = params.gen(g);
    }

    let gens = simu.evolve(params)?;

    println!("replicate\tgenerations\tfreq");
    for (rep, g) in gens.iter().enumerate() {
        let freq = simu
            .population(rep)
            .and_then(|p| p.vars().allele_freq(LocusId::from(0), 0))
            .unwrap_or(f64::NAN);
        println!("{}\t{}\t{}", rep, g, freq);
    }
    Ok(())
}
