//! Deterministic helpers for exercising the engine in tests.
//!
//! [`ScriptedDice`] replays a fixed sequence of rolls and selection picks,
//! which pins every branch of turn resolution without touching a real RNG.
//! It panics loudly when a script runs dry or produces an out-of-range
//! value, so a drifting test fails at the draw instead of three asserts
//! later.

use std::collections::VecDeque;

use crate::combatant::Combatant;
use crate::dice::{DiceSource, RollRange};

/// A [`DiceSource`] that pops pre-scripted values instead of rolling.
///
/// Rolls and picks are separate queues: engine construction and every
/// resolved turn consume one pick for the CPU's next move, and each clash
/// consumes two rolls per attempt (more when a tie forces a redraw).
#[derive(Debug, Default, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue roll results, consumed in order.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue selection picks, consumed in order. Each pick indexes into the
    /// affordable subset of the catalog, not the catalog itself.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }

    pub fn remaining_picks(&self) -> usize {
        self.picks.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, range: RollRange) -> i32 {
        let Some(value) = self.rolls.pop_front() else {
            panic!("scripted rolls ran out on a draw from {range}");
        };
        assert!(
            range.contains(value),
            "scripted roll {value} is outside {range}"
        );
        value
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let Some(index) = self.picks.pop_front() else {
            panic!("scripted picks ran out on a choice among {len} options");
        };
        assert!(
            index < len,
            "scripted pick {index} is out of bounds for {len} options"
        );
        index
    }
}

/// Assert a combatant's health, reporting the callsite on failure.
#[track_caller]
pub fn assert_health(combatant: &Combatant, expected: i32) {
    assert_eq!(
        combatant.health, expected,
        "expected {expected} health, found {}",
        combatant.health
    );
}

/// Assert a combatant's light, reporting the callsite on failure.
#[track_caller]
pub fn assert_light(combatant: &Combatant, expected: i32) {
    assert_eq!(
        combatant.light, expected,
        "expected {expected} light, found {}",
        combatant.light
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_rolls_pop_in_order() {
        let mut dice = ScriptedDice::new().with_rolls([3, 6, 4]);
        let range = RollRange::new(1, 10);
        assert_eq!(dice.roll(range), 3);
        assert_eq!(dice.roll(range), 6);
        assert_eq!(dice.roll(range), 4);
        assert_eq!(dice.remaining_rolls(), 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_scripted_roll_must_fit_the_range() {
        let mut dice = ScriptedDice::new().with_rolls([9]);
        dice.roll(RollRange::new(1, 6));
    }

    #[test]
    #[should_panic(expected = "ran out")]
    fn test_exhausted_script_panics() {
        let mut dice = ScriptedDice::new();
        dice.roll(RollRange::new(1, 6));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_scripted_pick_must_be_in_bounds() {
        let mut dice = ScriptedDice::new().with_picks([5]);
        dice.pick_index(3);
    }
}
