//! Recorded runs: bullets per stage from one real play-through, compared
//! against the simulated stage families.
//!
//! The file format is a two-column CSV with a header row followed by one row
//! per stage; only the second column (bullets) is read.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::ReferenceError;
use crate::mechanics::board::{FAMILY_COUNT, STAGE_COUNT, stage_family};

const COLUMNS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedRun {
    pub stages: Vec<u32>,
}

/// One recorded stage placed next to its family's box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub family: usize,
    pub x: f64,
    pub bullets: u32,
}

impl RecordedRun {
    pub fn from_stages(stages: Vec<u32>) -> Result<Self, ReferenceError> {
        if stages.len() != STAGE_COUNT {
            return Err(ReferenceError::StageCount(stages.len()));
        }
        Ok(Self { stages })
    }

    pub fn total(&self) -> u32 {
        self.stages.iter().sum()
    }

    /// Bullets grouped by stage family, stage order kept within a family.
    pub fn family_values(&self) -> Vec<Vec<u32>> {
        let mut out = vec![Vec::new(); FAMILY_COUNT];
        for (stage, &v) in self.stages.iter().enumerate() {
            out[stage_family(stage)].push(v);
        }
        out
    }

    /// Points spread across `[family - 0.1, family + 0.1)` in stage order so
    /// they do not stack on the family's box.
    pub fn overlay_points(&self) -> Vec<OverlayPoint> {
        let per_family = (self.stages.len() / FAMILY_COUNT).max(1) as f64;
        self.family_values()
            .into_iter()
            .enumerate()
            .flat_map(|(family, values)| {
                values.into_iter().enumerate().map(move |(k, bullets)| OverlayPoint {
                    family,
                    x: family as f64 + 0.2 * k as f64 / per_family - 0.1,
                    bullets,
                })
            })
            .collect()
    }
}

pub fn parse_recorded_run(text: &str) -> Result<RecordedRun, ReferenceError> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if rows.len() != STAGE_COUNT + 1 {
        return Err(ReferenceError::LineCount(rows.len()));
    }

    let mut stages = Vec::with_capacity(STAGE_COUNT);
    for (line, row) in rows.iter().enumerate() {
        let fields: Vec<&str> = row.split(',').map(|f| f.trim().trim_matches('"')).collect();
        if fields.len() != COLUMNS {
            return Err(ReferenceError::ColumnCount { line, found: fields.len() });
        }
        // header
        if line == 0 {
            continue;
        }
        let bullets = fields[1]
            .parse::<u32>()
            .map_err(|_| ReferenceError::Malformed(line))?;
        stages.push(bullets);
    }
    RecordedRun::from_stages(stages)
}

pub fn load_recorded_run(path: impl AsRef<Path>) -> Result<RecordedRun, ReferenceError> {
    let text = fs::read_to_string(path)?;
    parse_recorded_run(&text)
}
