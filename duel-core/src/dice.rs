//! Dice for the duel.
//!
//! Every move carries an inclusive roll range; a turn is decided by an
//! opposed roll between the two sides, rerolled until the results differ.
//! All randomness flows through the [`DiceSource`] trait so engines can run
//! on system entropy, a fixed seed, or a scripted source in tests.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive integer roll range, e.g. 3-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: i32,
    pub max: i32,
}

impl RollRange {
    /// Create a range. Bounds are validated when the surrounding rule set
    /// is validated, not here, so catalogs can be built as plain literals.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Number of distinct values the range can produce.
    pub fn span(&self) -> i32 {
        self.max - self.min + 1
    }

    /// True when the range can only ever produce a single value.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Source of randomness for rolls and CPU move selection.
///
/// Implemented for [`StdRng`], which covers both entropy-backed and seeded
/// play. Tests use the scripted source in [`crate::testing`] to pin exact
/// outcomes.
pub trait DiceSource {
    /// Draw a uniform value from an inclusive range.
    fn roll(&mut self, range: RollRange) -> i32;

    /// Pick a uniform index below `len`. Callers never pass zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl DiceSource for StdRng {
    fn roll(&mut self, range: RollRange) -> i32 {
        self.gen_range(range.min..=range.max)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// The accepted result of an opposed roll. Never a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpposedRoll {
    pub player: i32,
    pub cpu: i32,
}

impl OpposedRoll {
    pub fn player_won(&self) -> bool {
        self.player > self.cpu
    }
}

/// Roll both ranges, redrawing both sides while the results come up equal.
///
/// Two identical single-value ranges could never break the tie, so rule set
/// validation rejects fixed ranges before an engine accepts a catalog.
pub fn opposed_roll<S: DiceSource + ?Sized>(
    source: &mut S,
    player: RollRange,
    cpu: RollRange,
) -> OpposedRoll {
    loop {
        let player_roll = source.roll(player);
        let cpu_roll = source.roll(cpu);
        if player_roll != cpu_roll {
            return OpposedRoll {
                player: player_roll,
                cpu: cpu_roll,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RollRange::new(3, 6);
        for _ in 0..100 {
            let value = rng.roll(range);
            assert!(value >= 3 && value <= 6);
        }
    }

    #[test]
    fn test_fixed_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RollRange::new(5, 5);
        assert!(range.is_fixed());
        assert_eq!(rng.roll(range), 5);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(RollRange::new(2, 8).to_string(), "2-8");
        assert_eq!(RollRange::new(7, 10).span(), 4);
    }

    #[test]
    fn test_pick_index_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(rng.pick_index(6) < 6);
        }
    }

    #[test]
    fn test_opposed_roll_never_ties() {
        let mut rng = StdRng::seed_from_u64(99);
        let range = RollRange::new(2, 8);
        for _ in 0..100 {
            let result = opposed_roll(&mut rng, range, range);
            assert_ne!(result.player, result.cpu);
        }
    }

    #[test]
    fn test_opposed_roll_redraws_both_sides_on_tie() {
        // First pair ties at 4/4, so both sides draw again
        let mut dice = ScriptedDice::new().with_rolls([4, 4, 6, 3]);
        let result = opposed_roll(&mut dice, RollRange::new(3, 6), RollRange::new(2, 8));
        assert_eq!(result, OpposedRoll { player: 6, cpu: 3 });
        assert!(result.player_won());
        assert_eq!(dice.remaining_rolls(), 0);
    }
}
