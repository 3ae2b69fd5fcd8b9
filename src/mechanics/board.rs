//! Board mechanics: the fixed schedules of one stage and its mutable state.
use serde::Serialize;

use crate::mechanics::rules::RuleAlterations;

/// Stages per event run.
pub const STAGE_COUNT: usize = 100;

/// Minor prizes on a fresh board.
pub const INITIAL_MINOR_COUNT: i32 = 11;

/// Major prize weight on a fresh board.
pub const INITIAL_MAJOR_WEIGHT: i32 = 1;

/// Attempts after which the major prize is forced, repeating every 5 stages.
pub const HARD_LIMITS: [u32; 5] = [5, 6, 8, 5, 10];

/// Stages sharing one hard limit form a family; there are this many.
pub const FAMILY_COUNT: usize = HARD_LIMITS.len();

/// `(attempts, weight)`: after a miss on attempt `attempts` the major weight becomes `weight`.
pub const WEIGHT_STEPS: [(u32, i32); 3] = [(3, 5), (6, 10), (9, 30)];

/// Family index (`stage mod 5`) of a zero-based stage.
#[inline]
pub fn stage_family(stage: usize) -> usize {
    stage % FAMILY_COUNT
}

/// Hard limit of a zero-based stage.
#[inline]
pub fn hard_limit(stage: usize) -> u32 {
    HARD_LIMITS[stage_family(stage)]
}

/// Largest attempt count a stage can take: the attempt right after its hard limit.
#[inline]
pub fn max_stage_attempts(stage: usize) -> u32 {
    hard_limit(stage) + 1
}

/// New major weight after a miss on `attempts`, if the schedule steps there.
#[inline]
pub fn weight_after(attempts: u32) -> Option<i32> {
    WEIGHT_STEPS
        .iter()
        .find(|(at, _)| *at == attempts)
        .map(|(_, w)| *w)
}

/// Per-stage mutable state. `minor_count` has no floor: it may reach zero,
/// at which point any draw counts as a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageBoard {
    pub minor_count: i32,
    pub major_weight: i32,
    pub attempts: u32,
}

impl Default for StageBoard {
    fn default() -> Self {
        Self {
            minor_count: INITIAL_MINOR_COUNT,
            major_weight: INITIAL_MAJOR_WEIGHT,
            attempts: 0,
        }
    }
}

impl StageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the draw interval `[0, major_weight + minor_count)`.
    #[inline]
    pub fn range(&self) -> u32 {
        (self.major_weight + self.minor_count).max(1) as u32
    }

    /// Start the next attempt.
    #[inline]
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Hit test for draw `x` on `stage`. The hard limit wins over the draw;
    /// otherwise the top `major_weight` values of the interval are the major prize.
    #[inline]
    pub fn is_major_hit(&self, x: u32, stage: usize) -> bool {
        if self.attempts > hard_limit(stage) {
            return true;
        }
        i64::from(x) >= i64::from(self.minor_count)
    }

    /// Apply a miss: take one minor prize off the board, then step the weight.
    pub fn record_miss(&mut self, rules: RuleAlterations) {
        if !rules.keep_hit_targets {
            self.minor_count -= 1;
        }
        if !rules.no_weight_increase {
            if let Some(w) = weight_after(self.attempts) {
                self.major_weight = w;
            }
        }
    }
}
