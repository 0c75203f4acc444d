//! Difficulty tier → generation range table.
//!
//! The defaults below are the issued ranges; any of them can be overridden
//! per tier from the `[tiers]` section of the config file.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Tier;

/// Largest operand magnitude a tier may configure. Keeps stems readable and
/// leaves headroom for the anti-degeneracy increment.
pub const MAX_OPERAND: i64 = 1_000_000;

/// Inclusive integer range, written `[lo, hi]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange(pub i64, pub i64);

impl IntRange {
    pub fn lo(&self) -> i64 {
        self.0
    }

    pub fn hi(&self) -> i64 {
        self.1
    }

    pub fn contains(&self, n: i64) -> bool {
        (self.0..=self.1).contains(&n)
    }

    /// Uniform draw. Callers must only sample checked ranges.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.0..=self.1)
    }

    fn check(&self, path: &str, min_lo: i64, problems: &mut Vec<String>) {
        if self.0 > self.1 {
            problems.push(format!("{path}: lower bound {} exceeds upper bound {}", self.0, self.1));
        }
        if self.0 < min_lo {
            problems.push(format!("{path}: lower bound must be at least {min_lo}"));
        }
        if self.0.abs() > MAX_OPERAND || self.1.abs() > MAX_OPERAND {
            problems.push(format!("{path}: bounds must stay within ±{MAX_OPERAND}"));
        }
    }
}

impl std::fmt::Display for IntRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// Ranges for one fraction-comparison tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionRanges {
    pub numerator: IntRange,
    pub denominator: IntRange,
}

/// Ranges for one GCD tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcdRanges {
    pub operand: IntRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractionTiers {
    pub easy: FractionRanges,
    pub normal: FractionRanges,
    pub hard: FractionRanges,
}

impl Default for FractionTiers {
    fn default() -> Self {
        Self {
            easy: FractionRanges {
                numerator: IntRange(1, 7),
                denominator: IntRange(2, 8),
            },
            normal: FractionRanges {
                numerator: IntRange(1, 11),
                denominator: IntRange(2, 12),
            },
            hard: FractionRanges {
                numerator: IntRange(1, 20),
                denominator: IntRange(2, 20),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcdTiers {
    pub easy: GcdRanges,
    pub normal: GcdRanges,
    pub hard: GcdRanges,
}

impl Default for GcdTiers {
    fn default() -> Self {
        Self {
            easy: GcdRanges {
                operand: IntRange(6, 30),
            },
            normal: GcdRanges {
                operand: IntRange(10, 60),
            },
            hard: GcdRanges {
                operand: IntRange(10, 120),
            },
        }
    }
}

/// The full tier table, one entry per skill and tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub fraction: FractionTiers,
    pub gcd: GcdTiers,
}

impl TierTable {
    pub fn fraction(&self, tier: Tier) -> &FractionRanges {
        match tier {
            Tier::Easy => &self.fraction.easy,
            Tier::Normal => &self.fraction.normal,
            Tier::Hard => &self.fraction.hard,
        }
    }

    pub fn gcd(&self, tier: Tier) -> &GcdRanges {
        match tier {
            Tier::Easy => &self.gcd.easy,
            Tier::Normal => &self.gcd.normal,
            Tier::Hard => &self.gcd.hard,
        }
    }

    /// Reject tables that could issue a zero denominator, a non-positive
    /// GCD operand, or an empty range.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        for tier in Tier::ALL {
            let f = self.fraction(tier);
            f.numerator
                .check(&format!("fraction.{tier}.numerator"), -MAX_OPERAND, &mut problems);
            f.denominator
                .check(&format!("fraction.{tier}.denominator"), 2, &mut problems);
            self.gcd(tier)
                .operand
                .check(&format!("gcd.{tier}.operand"), 1, &mut problems);
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTiers(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_are_valid() {
        let table = TierTable::default();
        table.check().unwrap();
        assert_eq!(table.fraction(Tier::Easy).numerator, IntRange(1, 7));
        assert_eq!(table.fraction(Tier::Hard).denominator, IntRange(2, 20));
        assert_eq!(table.gcd(Tier::Normal).operand, IntRange(10, 60));
    }

    #[test]
    fn check_reports_every_bad_range() {
        let mut table = TierTable::default();
        table.fraction.easy.denominator = IntRange(0, 8);
        table.gcd.hard.operand = IntRange(50, 10);
        let err = table.check().unwrap_err();
        let ConfigError::InvalidTiers(problems) = err else {
            panic!("expected InvalidTiers");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("fraction.easy.denominator"));
        assert!(problems[1].contains("gcd.hard.operand"));
    }

    #[test]
    fn check_rejects_huge_bounds() {
        let mut table = TierTable::default();
        table.gcd.easy.operand = IntRange(1, i64::MAX);
        assert!(table.check().is_err());
    }

    #[test]
    fn partial_override_from_toml() {
        let table: TierTable = toml::from_str(
            r#"
[gcd.easy]
operand = [2, 12]
"#,
        )
        .unwrap();
        assert_eq!(table.gcd.easy.operand, IntRange(2, 12));
        assert_eq!(table.gcd.hard, GcdTiers::default().hard);
        assert_eq!(table.fraction, FractionTiers::default());
    }

    #[test]
    fn sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = IntRange(2, 5);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }
}
