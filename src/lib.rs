/*!
`bullseye` — a seeded sampling engine for the 100-stage bullseye loot event.

What it does
- Plays the event: 100 stages, each a weighted lottery between a shrinking pool
  of minor prizes and one major prize whose weight grows with failed attempts,
  with a hard limit that forces the major prize.
- Answers how many bullets (attempts) reaching stage 100 costs: best case
  (every draw hits), worst case (every draw misses) and the realistic spread
  over many seeded runs.
- Turns a batch of runs into plain numbers: mean, histogram, cumulative
  probability curve, breakpoints, per-stage-family box summaries.

How to use (call surface only)
- One run: `simulate_run(RunMode::Normal, seed) -> RunResult`.
- A batch: `run_batch(sample_count) -> Result<SimulationBatch, ConsistencyError>`,
  or `run_batch_with(&BatchConfig)` for seeds, rule alterations and threading.
- Statistics: the pure functions in `systems::stats` over a `SimulationBatch`.

Seeding
- Seed `0` means "unset" and is replaced by a time-derived seed; any other seed
  reproduces the same run. Sample `i` of a batch uses `base_seed + i`.

What it does NOT do
- No rendering, no file formats in the core, no persistence. The `cli` feature
  adds a driver binary that writes chart data as JSON.
*/

pub mod error;
pub mod mechanics;
pub mod reference;
pub mod report;
pub mod sweep;
pub mod systems;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ArtifactError, ConsistencyError, ReferenceError};
pub use mechanics::{RuleAlterations, STAGE_COUNT};
pub use systems::batch::{BatchConfig, SimulationBatch, run_batch, run_batch_with};
pub use systems::stage::{RunMode, RunResult, StageSimulator, simulate_run};

/// Seed of sample `i` for a batch starting at `base_seed`.
#[inline]
pub fn seed_at(base_seed: u64, i: usize) -> u64 {
    base_seed.saturating_add(i as u64)
}

/// Deterministic sampling: x_i = simulate(i, seed_0 + i), kept only if check(i, x_i) holds.
/// Stops at the first failed check; no partial result is returned.
pub fn sample_det<T, E, Sim, Check>(
    base_seed: u64,
    count: usize,
    mut simulate: Sim,
    mut check: Check,
) -> Result<Vec<T>, E>
where
    Sim: FnMut(usize, u64) -> T,
    Check: FnMut(usize, &T) -> Result<(), E>,
{
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let x = simulate(i, seed_at(base_seed, i));
        check(i, &x)?;
        out.push(x);
    }
    Ok(out)
}

/// Same contract as [`sample_det`], spread over the rayon pool.
/// Output order is sample order, so both produce identical vectors.
#[cfg(feature = "parallel")]
pub fn sample_par<T, E, Sim, Check>(
    base_seed: u64,
    count: usize,
    simulate: Sim,
    check: Check,
) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    Sim: Fn(usize, u64) -> T + Sync,
    Check: Fn(usize, &T) -> Result<(), E> + Sync,
{
    use rayon::prelude::*;

    (0..count)
        .into_par_iter()
        .map(|i| {
            let x = simulate(i, seed_at(base_seed, i));
            check(i, &x).map(|()| x)
        })
        .collect()
}
