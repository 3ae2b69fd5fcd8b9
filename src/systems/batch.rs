//! # Run aggregator
//!
//! Drives the stage simulator over a batch of seeds plus the two boundary
//! runs and checks that every sample lies between them.
//!
//! Steps:
//! 1. `worst_case` from an `AllFail` run, `best_case` from an `AllSuccess`
//!    run (both with the fixed boundary seed). `worst < best` fails the batch.
//! 2. Sample `i` plays a `Normal` run with seed `base_seed + i`. A total
//!    outside `[best_case, worst_case]` fails the batch.
//! 3. Totals are kept in sample order; per-stage breakdowns only for the
//!    first `stage_sample_limit` samples.
//!
//! A failed check aborts immediately: a detected inconsistency is a logic
//! defect, and statistics over such a batch would mislead.

use std::num::NonZeroU64;

use log::{debug, info};
use serde::Serialize;

use crate::error::{ConsistencyError, Result};
use crate::mechanics::rules::RuleAlterations;
use crate::systems::stage::{RunMode, StageSimulator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Normal-mode samples to draw.
    pub sample_count: usize,
    /// Seed of sample 0; later samples count up from here.
    pub base_seed: NonZeroU64,
    /// Seed handed to the boundary runs (they never read it).
    pub boundary_seed: NonZeroU64,
    pub rules: RuleAlterations,
    /// Samples whose per-stage breakdown is retained.
    pub stage_sample_limit: usize,
    /// Use the rayon pool when the `parallel` feature is on.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sample_count: 100_000,
            base_seed: NonZeroU64::new(1000).unwrap_or(NonZeroU64::MIN),
            boundary_seed: NonZeroU64::MIN,
            rules: RuleAlterations::default(),
            stage_sample_limit: 1000,
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn with_samples(sample_count: usize) -> Self {
        Self { sample_count, ..Default::default() }
    }

    pub fn with_rules(mut self, rules: RuleAlterations) -> Self {
        self.rules = rules;
        self
    }
}

/// Totals of one batch with the boundaries they were checked against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimulationBatch {
    pub rules: RuleAlterations,
    pub best_case: u32,
    pub worst_case: u32,
    /// Total bullets per sample, sample 0 first.
    pub simulations: Vec<u32>,
    /// Per-stage bullets of the first samples (see `stage_sample_limit`).
    pub stage_breakdowns: Vec<Vec<u32>>,
}

impl SimulationBatch {
    pub fn sample_count(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}

/// Best and worst case totals under `rules`.
pub fn boundaries(rules: RuleAlterations, seed: u64) -> Result<(u32, u32)> {
    let worst = StageSimulator::with_rules(RunMode::AllFail, rules).run(seed).total;
    let best = StageSimulator::with_rules(RunMode::AllSuccess, rules).run(seed).total;
    debug!("boundaries ({}): best {best}, worst {worst}", rules.describe());
    if worst < best {
        return Err(ConsistencyError::InvertedBounds { worst, best });
    }
    Ok((best, worst))
}

/// Sample `iter` with total `value` must lie within `[best, worst]`.
#[inline]
pub fn check_bounds(iter: usize, value: u32, best: u32, worst: u32) -> Result<()> {
    if value > worst {
        return Err(ConsistencyError::AboveWorstCase { iter, value, worst });
    }
    if value < best {
        return Err(ConsistencyError::BelowBestCase { iter, value, best });
    }
    Ok(())
}

/// Batch of `sample_count` samples with every other setting at its default.
pub fn run_batch(sample_count: usize) -> Result<SimulationBatch> {
    run_batch_with(&BatchConfig::with_samples(sample_count))
}

pub fn run_batch_with(cfg: &BatchConfig) -> Result<SimulationBatch> {
    let (best_case, worst_case) = boundaries(cfg.rules, cfg.boundary_seed.get())?;
    info!(
        "starting simulation with {} runs ({})",
        cfg.sample_count,
        cfg.rules.describe()
    );

    let sim = StageSimulator::with_rules(RunMode::Normal, cfg.rules);
    let limit = cfg.stage_sample_limit;
    let simulate = |i: usize, seed: u64| {
        let run = sim.run(seed);
        let stages = (i < limit).then_some(run.stages);
        (run.total, stages)
    };
    let check = |i: usize, x: &(u32, Option<Vec<u32>>)| check_bounds(i, x.0, best_case, worst_case);

    let samples = sample(cfg, simulate, check)?;

    let mut simulations = Vec::with_capacity(samples.len());
    let mut stage_breakdowns = Vec::with_capacity(limit.min(samples.len()));
    for (total, stages) in samples {
        simulations.push(total);
        stage_breakdowns.extend(stages);
    }
    info!("finished {} runs: best {best_case}, worst {worst_case}", simulations.len());

    Ok(SimulationBatch {
        rules: cfg.rules,
        best_case,
        worst_case,
        simulations,
        stage_breakdowns,
    })
}

#[cfg(feature = "parallel")]
fn sample<T, Sim, Check>(cfg: &BatchConfig, simulate: Sim, check: Check) -> Result<Vec<T>>
where
    T: Send,
    Sim: Fn(usize, u64) -> T + Sync,
    Check: Fn(usize, &T) -> Result<()> + Sync,
{
    if cfg.parallel {
        crate::sample_par(cfg.base_seed.get(), cfg.sample_count, simulate, check)
    } else {
        crate::sample_det(cfg.base_seed.get(), cfg.sample_count, simulate, check)
    }
}

#[cfg(not(feature = "parallel"))]
fn sample<T, Sim, Check>(cfg: &BatchConfig, simulate: Sim, check: Check) -> Result<Vec<T>>
where
    Sim: Fn(usize, u64) -> T,
    Check: Fn(usize, &T) -> Result<()>,
{
    crate::sample_det(cfg.base_seed.get(), cfg.sample_count, simulate, check)
}
