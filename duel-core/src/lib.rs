//! Light-duel combat engine.
//!
//! This crate provides:
//! - Turn resolution for a player-versus-CPU duel of opposed rolls
//! - A light resource economy with per-turn, skip, and idle regeneration
//! - Configurable rule sets with validated move catalogs
//! - Player profile persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use duel_core::{DuelEngine, RuleSet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = DuelEngine::new(RuleSet::classic())?;
//!
//!     let report = engine.play_move(0)?;
//!     for entry in engine.drain_log() {
//!         println!("{}", entry.message);
//!     }
//!
//!     if let Some(outcome) = report.outcome {
//!         println!("{:?} takes the match", outcome.winner());
//!     }
//!     Ok(())
//! }
//! ```

pub mod combatant;
pub mod dice;
pub mod engine;
pub mod log;
pub mod moves;
pub mod profile;
pub mod rules;
pub mod testing;

// Primary public API
pub use combatant::{Combatant, Side};
pub use dice::{DiceSource, OpposedRoll, RollRange};
pub use engine::{AppliedEffect, DuelEngine, MatchOutcome, TurnError, TurnEvent, TurnReport};
pub use log::{BattleLog, LogEntry, LogKind};
pub use moves::{Move, MoveKind};
pub use profile::{Profile, ProfileError};
pub use rules::{RuleSet, RulesError};
