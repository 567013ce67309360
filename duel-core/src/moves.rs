//! Moves: the catalog entries both sides fight with.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice::RollRange;

/// What a move does when it wins the clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Deals the move's damage to the loser.
    Attack,
    /// A dodge. Winning simply denies the opponent's move.
    Passive,
    /// Restores the winner's health, clamped at the rule set's maximum.
    Healing,
    /// Deals damage and makes the loser skip their next turn.
    Stun,
}

impl MoveKind {
    pub fn name(&self) -> &'static str {
        match self {
            MoveKind::Attack => "Attack",
            MoveKind::Passive => "Passive",
            MoveKind::Healing => "Healing",
            MoveKind::Stun => "Stun",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single move. Immutable once the rule set is built; catalog order is
/// only meaningful as the display/selection index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    /// Light required to play the move.
    pub cost: i32,
    /// The range this side rolls in the clash.
    pub roll: RollRange,
    /// Damage dealt on a win. Healing moves carry a negative value here
    /// that is never applied; the heal amount lives on the rule set.
    pub damage: i32,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        cost: i32,
        roll: RollRange,
        damage: i32,
        kind: MoveKind,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            roll,
            damage,
            kind,
        }
    }

    pub fn attack(name: impl Into<String>, cost: i32, roll: RollRange, damage: i32) -> Self {
        Self::new(name, cost, roll, damage, MoveKind::Attack)
    }

    pub fn passive(name: impl Into<String>, cost: i32, roll: RollRange) -> Self {
        Self::new(name, cost, roll, 0, MoveKind::Passive)
    }

    pub fn healing(name: impl Into<String>, cost: i32, roll: RollRange, damage: i32) -> Self {
        Self::new(name, cost, roll, damage, MoveKind::Healing)
    }

    pub fn stun(name: impl Into<String>, cost: i32, roll: RollRange, damage: i32) -> Self {
        Self::new(name, cost, roll, damage, MoveKind::Stun)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Cost: {}) Roll: {} Damage: {}",
            self.name, self.cost, self.roll, self.damage
        )
    }
}
