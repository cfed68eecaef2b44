use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use replisim_core::{Generation, Population, ReplicateId};
use replisim_mating::MatingScheme;

use crate::{Action, Operator, ReplisimError};

/// Operators, mating scheme and duration of one call to
/// [`Simulator::evolve`].
///
/// With `gen` set to `None`, evolution continues until every
/// replicate has been stopped by an operator.
pub struct EvolutionParams<M: MatingScheme> {
    /// Applied once to every replicate before the first generation.
    pub init_ops: Vec<Box<dyn Operator>>,
    /// Applied to the parental generation before mating.
    pub pre_ops: Vec<Box<dyn Operator>>,
    pub mating_scheme: M,
    /// Applied to the offspring generation.
    pub post_ops: Vec<Box<dyn Operator>>,
    /// Number of generations to evolve.
    pub gen: Option<u64>,
}

impl<M: MatingScheme> EvolutionParams<M> {
    pub fn new(mating_scheme: M) -> Self {
        Self {
            init_ops: vec![],
            pre_ops: vec![],
            mating_scheme,
            post_ops: vec![],
            gen: None,
        }
    }

    pub fn init_ops(mut self, ops: Vec<Box<dyn Operator>>) -> Self {
        self.init_ops = ops;
        self
    }

    pub fn pre_ops(mut self, ops: Vec<Box<dyn Operator>>) -> Self {
        self.pre_ops = ops;
        self
    }

    pub fn post_ops(mut self, ops: Vec<Box<dyn Operator>>) -> Self {
        self.post_ops = ops;
        self
    }

    pub fn gen(mut self, gen: u64) -> Self {
        self.gen = Some(gen);
        self
    }
}

#[derive(Debug)]
struct Replicate {
    population: Population,
    rng: StdRng,
}

/// Apply the active operators of one stage, stopping at the first
/// operator that asks to stop.
fn apply_ops(
    ops: &mut [Box<dyn Operator>],
    replicate: &mut Replicate,
    id: ReplicateId,
    last: Option<Generation>,
) -> Result<Action, ReplisimError> {
    let gen = replicate.population.generation();
    for op in ops.iter_mut() {
        if !op.applicability().is_active(id, gen, last) {
            continue;
        }
        let action = op.apply(&mut replicate.population, &mut replicate.rng)?;
        if action != Action::Continue {
            tracing::debug!(replicate = %id, generation = %gen, operator = op.name(), ?action);
            return Ok(action);
        }
    }
    Ok(Action::Continue)
}

impl Replicate {
    /// # Returns
    ///
    /// The requested action and whether a generation was completed.
    fn evolve_generation<M: MatingScheme>(
        &mut self,
        id: ReplicateId,
        last: Option<Generation>,
        pre_ops: &mut [Box<dyn Operator>],
        mating_scheme: &mut M,
        post_ops: &mut [Box<dyn Operator>],
    ) -> Result<(Action, bool), ReplisimError> {
        let action = apply_ops(pre_ops, self, id, last)?;
        if action != Action::Continue {
            return Ok((action, false));
        }
        mating_scheme
            .mate(&mut self.population, &mut self.rng)
            .map_err(|value| ReplisimError::MatingError {
                replicate: id,
                value,
            })?;
        let action = apply_ops(post_ops, self, id, last)?;
        let next = self.population.generation().next();
        self.population.set_generation(next);
        Ok((action, true))
    }
}

/// A set of replicates evolving under the same scheme.
///
/// Every replicate starts as a copy of one population and has its
/// own random number generator, seeded from a master seed.
///
/// # Examples
///
/// ```
/// use replisim::prelude::*;
///
/// let pop = Population::new(&[100], GenoStructure::new(2, &[2]).unwrap()).unwrap();
/// let mut simu = Simulator::new(pop, 3, 42).unwrap();
/// let gens = simu
///     .evolve(
///         EvolutionParams::new(RandomMating::new())
///             .init_ops(vec![
///                 Box::new(InitSex::new()),
///                 Box::new(InitByFreq::new(&[0.3, 0.7]).unwrap()),
///             ])
///             .gen(10),
///     )
///     .unwrap();
/// assert_eq!(gens, vec![10, 10, 10]);
/// assert!(simu.populations().all(|p| p.generation() == 10_u64));
/// ```
#[derive(Debug)]
pub struct Simulator {
    replicates: Vec<Replicate>,
}

impl Simulator {
    pub fn new(pop: Population, replicates: usize, seed: u64) -> Result<Self, ReplisimError> {
        if replicates == 0 {
            return Err(ReplisimError::NoReplicates);
        }
        let mut master = StdRng::seed_from_u64(seed);
        let replicates = (0..replicates)
            .map(|_| Replicate {
                population: pop.clone(),
                rng: StdRng::seed_from_u64(master.gen()),
            })
            .collect();
        Ok(Self { replicates })
    }

    pub fn num_replicates(&self) -> usize {
        self.replicates.len()
    }

    pub fn population(&self, rep: usize) -> Option<&Population> {
        self.replicates.get(rep).map(|r| &r.population)
    }

    pub fn population_mut(&mut self, rep: usize) -> Option<&mut Population> {
        self.replicates.get_mut(rep).map(|r| &mut r.population)
    }

    pub fn populations(&self) -> impl Iterator<Item = &Population> {
        self.replicates.iter().map(|r| &r.population)
    }

    pub fn populations_mut(&mut self) -> impl Iterator<Item = &mut Population> {
        self.replicates.iter_mut().map(|r| &mut r.population)
    }

    pub fn generation(&self, rep: usize) -> Option<Generation> {
        self.population(rep).map(|p| p.generation())
    }

    /// Evolve all replicates.
    ///
    /// Replicates advance one generation at a time, in index order.
    /// A replicate stops when an operator returns
    /// [`Action::StopReplicate`], or when `gen` generations have
    /// been evolved. When an operator returns [`Action::StopAll`],
    /// every replicate stops at once: replicates with a lower index
    /// have completed the current generation, those with a higher
    /// index have not.
    ///
    /// A stop requested by a pre-mating operator happens before mating,
    /// so that generation is not counted.
    ///
    /// # Returns
    ///
    /// The number of generations evolved by each replicate.
    pub fn evolve<M: MatingScheme>(
        &mut self,
        params: EvolutionParams<M>,
    ) -> Result<Vec<u64>, ReplisimError> {
        let EvolutionParams {
            mut init_ops,
            mut pre_ops,
            mut mating_scheme,
            mut post_ops,
            gen,
        } = params;

        for op in init_ops.iter().chain(pre_ops.iter()).chain(post_ops.iter()) {
            op.applicability().validate(gen.is_some())?;
        }
        for (i, replicate) in self.replicates.iter().enumerate() {
            mating_scheme
                .is_compatible(&replicate.population)
                .map_err(|value| ReplisimError::MatingError {
                    replicate: ReplicateId::from(i),
                    value,
                })?;
        }

        tracing::info!(
            replicates = self.replicates.len(),
            ?gen,
            mating_scheme = mating_scheme.name(),
            "start evolving"
        );

        for (i, replicate) in self.replicates.iter_mut().enumerate() {
            let id = ReplicateId::from(i);
            for op in init_ops.iter_mut() {
                if op.applicability().applies_to_replicate(id) {
                    op.apply(&mut replicate.population, &mut replicate.rng)?;
                }
            }
        }

        let n = self.replicates.len();
        let last = self
            .replicates
            .iter()
            .map(|r| match gen {
                Some(g) if g > 0 => Some(Generation::from(r.population.generation().raw() + g - 1)),
                _ => None,
            })
            .collect::<Vec<_>>();
        let mut active = vec![true; n];
        let mut evolved = vec![0_u64; n];

        'generations: while active.iter().any(|&a| a) {
            for i in 0..n {
                if !active[i] {
                    continue;
                }
                if gen.map_or(false, |g| evolved[i] >= g) {
                    active[i] = false;
                    continue;
                }
                let id = ReplicateId::from(i);
                let (action, completed) = self.replicates[i].evolve_generation(
                    id,
                    last[i],
                    &mut pre_ops,
                    &mut mating_scheme,
                    &mut post_ops,
                )?;
                if completed {
                    evolved[i] += 1;
                }
                match action {
                    Action::Continue => (),
                    Action::StopReplicate => {
                        tracing::info!(replicate = %id, generations = evolved[i], "replicate stopped");
                        active[i] = false;
                    }
                    Action::StopAll => {
                        tracing::info!(replicate = %id, generations = evolved[i], "all replicates stopped");
                        break 'generations;
                    }
                }
            }
        }

        tracing::info!(?evolved, "finished evolving");
        Ok(evolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Applicability, InitByValue, TerminateIf};
    use replisim_core::GenoStructure;
    use replisim_mating::NoMating;

    fn pop() -> Population {
        Population::new(&[10], GenoStructure::new(2, &[1]).unwrap()).unwrap()
    }

    #[test]
    fn test_no_replicates() {
        assert_eq!(
            Simulator::new(pop(), 0, 1).unwrap_err(),
            ReplisimError::NoReplicates
        );
    }

    #[test]
    fn test_replicates_have_distinct_streams() {
        let simu = Simulator::new(pop(), 2, 1).unwrap();
        let mut a = simu.replicates[0].rng.clone();
        let mut b = simu.replicates[1].rng.clone();
        let x: u64 = a.gen();
        let y: u64 = b.gen();
        assert_ne!(x, y);
    }

    #[test]
    fn test_zero_generations() {
        let mut simu = Simulator::new(pop(), 2, 1).unwrap();
        let gens = simu
            .evolve(
                EvolutionParams::new(NoMating::new())
                    .init_ops(vec![Box::new(InitByValue::new(&[3]).unwrap())])
                    .gen(0),
            )
            .unwrap();
        assert_eq!(gens, vec![0, 0]);
        assert_eq!(simu.population(1).unwrap().individuals()[0].copy(0), &[3]);
    }

    #[test]
    fn test_init_ops_honour_replicate_filter() {
        let mut simu = Simulator::new(pop(), 3, 1).unwrap();
        let init = InitByValue::new(&[2])
            .unwrap()
            .with_applicability(Applicability::new().reps(&[ReplicateId::from(1)]));
        simu.evolve(
            EvolutionParams::new(NoMating::new())
                .init_ops(vec![Box::new(init)])
                .gen(1),
        )
        .unwrap();
        for (rep, expected) in [(0, 0), (1, 2), (2, 0)] {
            let pop = simu.population(rep).unwrap();
            assert!(pop
                .individuals()
                .iter()
                .all(|ind| ind.copy(0) == [expected] && ind.copy(1) == [expected]));
        }
    }

    #[test]
    fn test_pre_op_stop_is_not_counted() {
        let mut simu = Simulator::new(pop(), 2, 1).unwrap();
        let gens = simu
            .evolve(
                EvolutionParams::new(NoMating::new())
                    .pre_ops(vec![Box::new(TerminateIf::new(|p| p.generation() == 3_u64))]),
            )
            .unwrap();
        assert_eq!(gens, vec![3, 3]);
        assert_eq!(simu.generation(0), Some(Generation::from(3_u64)));
    }

    #[test]
    fn test_replicate_specific_terminator() {
        let mut simu = Simulator::new(pop(), 3, 1).unwrap();
        let gens = simu
            .evolve(
                EvolutionParams::new(NoMating::new())
                    .post_ops(vec![Box::new(
                        TerminateIf::new(|_| true)
                            .with_applicability(Applicability::new().reps(&[ReplicateId::from(1)])),
                    )])
                    .gen(5),
            )
            .unwrap();
        assert_eq!(gens, vec![5, 1, 5]);
    }

    #[test]
    fn test_stop_all_in_middle_replicate() {
        let mut simu = Simulator::new(pop(), 4, 1).unwrap();
        let gens = simu
            .evolve(
                EvolutionParams::new(NoMating::new()).post_ops(vec![Box::new(
                    TerminateIf::new(|p| p.generation() == 2_u64)
                        .stop_all(true)
                        .with_applicability(Applicability::new().reps(&[ReplicateId::from(2)])),
                )]),
            )
            .unwrap();
        assert_eq!(gens, vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_negative_generation_needs_end() {
        let mut simu = Simulator::new(pop(), 1, 1).unwrap();
        let r = simu.evolve(
            EvolutionParams::new(NoMating::new()).post_ops(vec![Box::new(
                TerminateIf::new(|_| true).with_applicability(Applicability::new().at(&[-1])),
            )]),
        );
        assert_eq!(r, Err(ReplisimError::NegativeGenerationWithoutEnd));
    }

    #[test]
    fn test_last_generation_operator() {
        let mut simu = Simulator::new(pop(), 2, 1).unwrap();
        let gens = simu
            .evolve(
                EvolutionParams::new(NoMating::new())
                    .post_ops(vec![Box::new(
                        TerminateIf::new(|_| true).with_applicability(Applicability::new().at(&[-2])),
                    )])
                    .gen(10),
            )
            .unwrap();
        assert_eq!(gens, vec![9, 9]);
    }

    #[test]
    fn test_evolve_continues() {
        let mut simu = Simulator::new(pop(), 2, 1).unwrap();
        for _ in 0..2 {
            let gens = simu
                .evolve(EvolutionParams::new(NoMating::new()).gen(4))
                .unwrap();
            assert_eq!(gens, vec![4, 4]);
        }
        assert_eq!(simu.generation(1), Some(Generation::from(8_u64)));
    }
}
