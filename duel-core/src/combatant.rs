//! Combatant state: health, light, and the stun flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Cpu,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Cpu => "CPU",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One side's mutable match state.
///
/// Health is only clamped upward (healing never exceeds the maximum); it
/// can go below zero on the turn that ends the match. Light never goes
/// negative and has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub health: i32,
    pub light: i32,
    pub stunned: bool,
}

impl Combatant {
    pub fn new(health: i32, light: i32) -> Self {
        Self {
            health,
            light,
            stunned: false,
        }
    }

    /// Apply damage. The engine checks for defeat afterwards.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Heal up to `maximum`, returning the amount actually restored.
    pub fn heal(&mut self, amount: i32, maximum: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(maximum);
        self.health - before
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.light >= cost
    }

    /// Deduct light for a move. Callers check affordability first.
    pub fn spend_light(&mut self, cost: i32) {
        self.light -= cost;
    }

    pub fn gain_light(&mut self, amount: i32) {
        self.light += amount;
    }

    /// Clear the stun flag, reporting whether it was set. Called at the
    /// start of the turn in which the flag is consulted.
    pub fn consume_stun(&mut self) -> bool {
        std::mem::take(&mut self.stunned)
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Health as a fraction of `maximum`, clamped to 0.0..=1.0 for gauges.
    pub fn health_ratio(&self, maximum: i32) -> f32 {
        if maximum <= 0 {
            return 0.0;
        }
        (self.health.clamp(0, maximum) as f32) / (maximum as f32)
    }
}
