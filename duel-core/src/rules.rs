//! Rule sets: a move catalog plus the tuning constants around it.
//!
//! Two catalogs ship built in. `classic` is the original six-move table;
//! `extended` trades the heal for a stun and regenerates light faster.
//! Custom rule sets can be loaded from JSON and are validated before an
//! engine will accept them.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::dice::RollRange;
use crate::moves::{Move, MoveKind};

/// Error type for building or loading a rule set.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Rule set '{0}' has no moves")]
    EmptyCatalog(String),
    #[error("Move '{name}' has an inverted roll range {min}-{max}")]
    InvalidRoll { name: String, min: i32, max: i32 },
    #[error("Move '{name}' needs a roll range spanning at least two values, got {value}-{value}")]
    FixedRoll { name: String, value: i32 },
    #[error("Move '{name}' has a negative cost: {cost}")]
    NegativeCost { name: String, cost: i32 },
    #[error("Max health must be positive, got {0}")]
    InvalidMaxHealth(i32),
    #[error("Starting health must be between 1 and {max}, got {starting}")]
    InvalidStartingHealth { starting: i32, max: i32 },
    #[error("{field} cannot be negative: {value}")]
    NegativeLight { field: &'static str, value: i32 },
    #[error("Idle regeneration must be positive, got {0}")]
    InvalidIdleRegen(i32),
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

lazy_static! {
    static ref CLASSIC_MOVES: Vec<Move> = vec![
        Move::attack("Power Strike", 5, RollRange::new(3, 6), 20),
        Move::attack("Quick Slash", 3, RollRange::new(2, 8), 10),
        Move::passive("Defensive Stance", 4, RollRange::new(3, 8)),
        Move::healing("Heal", 8, RollRange::new(4, 6), -20),
        Move::attack("Blitz", 15, RollRange::new(1, 10), 40),
        Move::passive("Perfect Dodge", 10, RollRange::new(7, 10)),
    ];
    static ref EXTENDED_MOVES: Vec<Move> = vec![
        Move::attack("Power Strike", 5, RollRange::new(3, 6), 20),
        Move::attack("Quick Slash", 3, RollRange::new(2, 8), 10),
        Move::passive("Guard", 4, RollRange::new(3, 8)),
        Move::stun("Stunning Blow", 12, RollRange::new(2, 7), 15),
        Move::attack("Blitz", 15, RollRange::new(1, 10), 40),
    ];
}

/// A complete set of duel rules.
///
/// Serializable so custom catalogs can be kept in JSON files and handed to
/// the engine at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    pub moves: Vec<Move>,
    pub max_health: i32,
    pub starting_health: i32,
    pub starting_light: i32,
    /// Light both sides regain after a played turn.
    pub turn_regen: i32,
    /// Light the player regains by skipping a turn.
    pub skip_regen: i32,
    /// Light the CPU tops up with when it cannot afford any move.
    pub idle_regen: i32,
    /// Health a winning Healing move restores, clamped at `max_health`.
    pub heal_amount: i32,
}

impl RuleSet {
    /// The original six-move rules: slow regeneration, heal available.
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            moves: CLASSIC_MOVES.clone(),
            max_health: 100,
            starting_health: 100,
            starting_light: 10,
            turn_regen: 2,
            skip_regen: 4,
            idle_regen: 6,
            heal_amount: 20,
        }
    }

    /// The five-move rules with a stun and faster light regeneration.
    pub fn extended() -> Self {
        Self {
            name: "extended".to_string(),
            moves: EXTENDED_MOVES.clone(),
            max_health: 100,
            starting_health: 100,
            starting_light: 10,
            turn_regen: 3,
            skip_regen: 6,
            idle_regen: 6,
            heal_amount: 20,
        }
    }

    /// Look up a built-in rule set by name (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("classic") {
            Some(Self::classic())
        } else if name.eq_ignore_ascii_case("extended") {
            Some(Self::extended())
        } else {
            None
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_starting_health(mut self, starting_health: i32) -> Self {
        self.starting_health = starting_health;
        self
    }

    pub fn with_starting_light(mut self, starting_light: i32) -> Self {
        self.starting_light = starting_light;
        self
    }

    pub fn with_turn_regen(mut self, turn_regen: i32) -> Self {
        self.turn_regen = turn_regen;
        self
    }

    pub fn with_skip_regen(mut self, skip_regen: i32) -> Self {
        self.skip_regen = skip_regen;
        self
    }

    pub fn with_idle_regen(mut self, idle_regen: i32) -> Self {
        self.idle_regen = idle_regen;
        self
    }

    pub fn with_heal_amount(mut self, heal_amount: i32) -> Self {
        self.heal_amount = heal_amount;
        self
    }

    /// Look up a move by name (case-insensitive).
    pub fn get_move(&self, name: &str) -> Option<&Move> {
        self.moves
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Whether the catalog contains a move of the given kind.
    pub fn has_kind(&self, kind: MoveKind) -> bool {
        self.moves.iter().any(|m| m.kind == kind)
    }

    /// Check the rule set before play. Engines refuse unvalidated sets.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.moves.is_empty() {
            return Err(RulesError::EmptyCatalog(self.name.clone()));
        }
        for m in &self.moves {
            if m.roll.min > m.roll.max {
                return Err(RulesError::InvalidRoll {
                    name: m.name.clone(),
                    min: m.roll.min,
                    max: m.roll.max,
                });
            }
            // A tie rerolls until the results differ; a single-value range
            // clashing with itself never would
            if m.roll.is_fixed() {
                return Err(RulesError::FixedRoll {
                    name: m.name.clone(),
                    value: m.roll.min,
                });
            }
            if m.cost < 0 {
                return Err(RulesError::NegativeCost {
                    name: m.name.clone(),
                    cost: m.cost,
                });
            }
        }
        if self.max_health <= 0 {
            return Err(RulesError::InvalidMaxHealth(self.max_health));
        }
        if self.starting_health < 1 || self.starting_health > self.max_health {
            return Err(RulesError::InvalidStartingHealth {
                starting: self.starting_health,
                max: self.max_health,
            });
        }
        for (field, value) in [
            ("Starting light", self.starting_light),
            ("Turn regeneration", self.turn_regen),
            ("Skip regeneration", self.skip_regen),
        ] {
            if value < 0 {
                return Err(RulesError::NegativeLight { field, value });
            }
        }
        // CPU selection tops up with idle_regen until a move is affordable,
        // so a non-positive value could loop forever
        if self.idle_regen < 1 {
            return Err(RulesError::InvalidIdleRegen(self.idle_regen));
        }
        Ok(())
    }

    /// Load and validate a rule set from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let contents = fs::read_to_string(path)?;
        let rules: RuleSet = serde_json::from_str(&contents)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Write the rule set to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RulesError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_catalog() {
        let rules = RuleSet::classic();
        assert_eq!(rules.moves.len(), 6);
        assert_eq!(rules.turn_regen, 2);
        assert_eq!(rules.skip_regen, 4);
        assert_eq!(rules.idle_regen, 6);
        assert!(!rules.has_kind(MoveKind::Stun));
        assert!(rules.validate().is_ok());

        let strike = rules.get_move("power strike").unwrap();
        assert_eq!(strike.cost, 5);
        assert_eq!(strike.roll, RollRange::new(3, 6));
        assert_eq!(strike.damage, 20);

        // Heal carries -20 in the damage column but heals heal_amount
        let heal = rules.get_move("Heal").unwrap();
        assert_eq!(heal.damage, -20);
        assert_eq!(rules.heal_amount, 20);
    }

    #[test]
    fn test_extended_catalog() {
        let rules = RuleSet::extended();
        assert_eq!(rules.moves.len(), 5);
        assert_eq!(rules.turn_regen, 3);
        assert_eq!(rules.skip_regen, 6);
        assert!(rules.has_kind(MoveKind::Stun));
        assert!(!rules.has_kind(MoveKind::Healing));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(RuleSet::named("Classic").unwrap().name, "classic");
        assert_eq!(RuleSet::named("EXTENDED").unwrap().name, "extended");
        assert!(RuleSet::named("tournament").is_none());
    }

    #[test]
    fn test_validate_empty_catalog() {
        let rules = RuleSet::classic().with_moves(vec![]);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::EmptyCatalog(_))
        ));
    }

    #[test]
    fn test_validate_inverted_roll() {
        let rules = RuleSet::classic().with_moves(vec![Move::attack(
            "Backwards",
            3,
            RollRange::new(8, 2),
            10,
        )]);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::InvalidRoll { min: 8, max: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_single_value_roll() {
        // Both sides draw from the same catalog, so a fixed range can meet
        // itself in a clash and reroll the same tie forever
        let rules = RuleSet::classic().with_moves(vec![Move::attack(
            "Fixed Jab",
            0,
            RollRange::new(4, 4),
            5,
        )]);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::FixedRoll { value: 4, .. })
        ));
    }

    #[test]
    fn test_validate_negative_cost() {
        let rules = RuleSet::classic().with_moves(vec![Move::attack(
            "Freebie",
            -1,
            RollRange::new(1, 4),
            5,
        )]);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::NegativeCost { cost: -1, .. })
        ));
    }

    #[test]
    fn test_validate_max_health() {
        let rules = RuleSet::classic().with_max_health(0);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::InvalidMaxHealth(0))
        ));
    }

    #[test]
    fn test_validate_starting_health_within_cap() {
        let rules = RuleSet::classic().with_starting_health(150);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::InvalidStartingHealth {
                starting: 150,
                max: 100
            })
        ));

        let rules = RuleSet::classic().with_starting_health(0);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_light_values() {
        let rules = RuleSet::classic().with_starting_light(-5);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::NegativeLight { value: -5, .. })
        ));

        let rules = RuleSet::classic().with_skip_regen(-1);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_idle_regen_must_be_positive() {
        // A CPU that cannot afford anything tops up by this amount, so
        // zero would never terminate
        let rules = RuleSet::classic().with_idle_regen(0);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::InvalidIdleRegen(0))
        ));
    }

    #[test]
    fn test_builders() {
        let rules = RuleSet::classic()
            .with_name("house rules")
            .with_turn_regen(5)
            .with_starting_light(20);
        assert_eq!(rules.name, "house rules");
        assert_eq!(rules.turn_regen, 5);
        assert_eq!(rules.starting_light, 20);
        // Untouched fields keep the classic values
        assert_eq!(rules.skip_regen, 4);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("house_rules.json");

        let original = RuleSet::extended().with_name("tournament");
        original.save(&path).unwrap();

        let loaded = RuleSet::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("broken.json");

        let broken = RuleSet::classic().with_max_health(-5);
        broken.save(&path).unwrap();

        assert!(matches!(
            RuleSet::load(&path),
            Err(RulesError::InvalidMaxHealth(-5))
        ));
    }
}
