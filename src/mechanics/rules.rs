//! Rule alterations: what-if toggles that break one promise of the event.
//! Both default to off (rules as stated) and compose freely.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RuleAlterations {
    /// A missed minor prize stays on the board and can be hit again.
    pub keep_hit_targets: bool,
    /// The major weight never steps up after attempts 3, 6 and 9.
    pub no_weight_increase: bool,
}

impl RuleAlterations {
    pub fn as_stated() -> Self {
        Self::default()
    }

    /// All four combinations: weight toggle outer, target toggle inner.
    pub fn all_variants() -> [Self; 4] {
        let mut out = [Self::default(); 4];
        let mut i = 0;
        for no_weight_increase in [false, true] {
            for keep_hit_targets in [false, true] {
                out[i] = Self { keep_hit_targets, no_weight_increase };
                i += 1;
            }
        }
        out
    }

    pub fn is_altered(&self) -> bool {
        self.keep_hit_targets || self.no_weight_increase
    }

    /// Human-readable summary, used in batch headers.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.keep_hit_targets {
            parts.push("hit targets are not removed and can be hit again");
        }
        if self.no_weight_increase {
            parts.push("the promised increased chance to hit the major target is not honored");
        }
        if parts.is_empty() {
            return "following the rules as stated".to_string();
        }
        format!("alterations included in the ruleset: {}", parts.join(", "))
    }

    /// Suffix for artifact file names; empty when no rule is altered.
    pub fn file_suffix(&self) -> String {
        let mut parts = Vec::new();
        if self.keep_hit_targets {
            parts.push("targets_not_removed");
        }
        if self.no_weight_increase {
            parts.push("weight_not_increased_as_promised");
        }
        if parts.is_empty() {
            return String::new();
        }
        format!("_{}", parts.join("_and_"))
    }
}
