//! The duel engine: turn resolution, resource bookkeeping, CPU selection,
//! and win/loss detection.
//!
//! A [`DuelEngine`] owns all match state. Frontends render from its
//! accessors and battle log, and mutate only through [`DuelEngine::play_move`],
//! [`DuelEngine::skip_turn`], and [`DuelEngine::reset_match`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combatant::{Combatant, Side};
use crate::dice::{opposed_roll, DiceSource, OpposedRoll};
use crate::log::{BattleLog, LogEntry, LogKind};
use crate::moves::{Move, MoveKind};
use crate::rules::{RuleSet, RulesError};

/// Error type for turn requests. All variants are recoverable: each logs a
/// single line and leaves the match state otherwise untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("The match is over; reset to play again")]
    MatchOver,
    #[error("Not enough light: need {cost}, have {available}")]
    NotEnoughLight { cost: i32, available: i32 },
    #[error("No move at index {index}")]
    UnknownMove { index: usize },
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    PlayerWon,
    CpuWon,
}

impl MatchOutcome {
    pub fn winner(&self) -> Side {
        match self {
            MatchOutcome::PlayerWon => Side::Player,
            MatchOutcome::CpuWon => Side::Cpu,
        }
    }

    pub fn loser(&self) -> Side {
        self.winner().opponent()
    }
}

/// The concrete mutation a winning move produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppliedEffect {
    /// Damage dealt to the losing side.
    Damage { target: Side, amount: i32 },
    /// Health restored to the winning side, after clamping.
    Healed { target: Side, amount: i32 },
    /// The winner's dodge denied the loser's move.
    Dodged { by: Side },
    /// Damage plus a stun on the losing side.
    Stunned { target: Side, damage: i32 },
}

/// The decisive part of a resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Both sides rolled; the winner's move was applied to the loser.
    Clash {
        player_move: Move,
        cpu_move: Move,
        rolls: OpposedRoll,
        winner: Side,
        effect: AppliedEffect,
    },
    /// The player's pending stun fired and consumed the turn.
    PlayerStunned,
    /// The CPU's pending stun fired; the player's move landed unopposed.
    CpuStunned {
        player_move: Move,
        effect: AppliedEffect,
    },
    /// The player skipped; the CPU's move landed unopposed. Both fields are
    /// `None` when the CPU's own stun fired instead.
    Skipped {
        cpu_move: Option<Move>,
        effect: Option<AppliedEffect>,
    },
}

/// What a turn did, reported back to the caller alongside the log lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub event: TurnEvent,
    /// Player state after the turn.
    pub player: Combatant,
    /// CPU state after the turn.
    pub cpu: Combatant,
    /// Set when this turn ended the match.
    pub outcome: Option<MatchOutcome>,
}

/// A single player-versus-CPU match.
#[derive(Debug)]
pub struct DuelEngine<S: DiceSource = StdRng> {
    rules: RuleSet,
    dice: S,
    player: Combatant,
    cpu: Combatant,
    /// Always a valid catalog index between turns.
    cpu_choice: usize,
    locked: bool,
    outcome: Option<MatchOutcome>,
    log: BattleLog,
}

impl DuelEngine<StdRng> {
    /// Create an engine rolling on system entropy.
    pub fn new(rules: RuleSet) -> Result<Self, RulesError> {
        Self::with_dice(rules, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible roll stream.
    pub fn seeded(rules: RuleSet, seed: u64) -> Result<Self, RulesError> {
        Self::with_dice(rules, StdRng::seed_from_u64(seed))
    }
}

impl<S: DiceSource> DuelEngine<S> {
    /// Create an engine on a caller-supplied dice source.
    pub fn with_dice(rules: RuleSet, dice: S) -> Result<Self, RulesError> {
        rules.validate()?;
        let player = Combatant::new(rules.starting_health, rules.starting_light);
        let cpu = player.clone();
        let mut engine = Self {
            rules,
            dice,
            player,
            cpu,
            cpu_choice: 0,
            locked: false,
            outcome: None,
            log: BattleLog::new(),
        };
        engine.choose_cpu_move();
        Ok(engine)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The move catalog, in display order.
    pub fn moves(&self) -> &[Move] {
        &self.rules.moves
    }

    /// The move the CPU will play this turn.
    pub fn cpu_choice(&self) -> &Move {
        &self.rules.moves[self.cpu_choice]
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn cpu(&self) -> &Combatant {
        &self.cpu
    }

    /// Mutable player state. Use with caution - direct modifications bypass
    /// turn resolution and the lock.
    pub fn player_mut(&mut self) -> &mut Combatant {
        &mut self.player
    }

    /// Mutable CPU state. Use with caution - direct modifications bypass
    /// turn resolution and the lock.
    pub fn cpu_mut(&mut self) -> &mut Combatant {
        &mut self.cpu
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Log entries appended since the last call, for incremental display.
    pub fn drain_log(&mut self) -> &[LogEntry] {
        self.log.drain_new()
    }

    // =========================================================================
    // Turn resolution
    // =========================================================================

    /// Play the catalog move at `index` against the CPU's chosen move.
    ///
    /// The full sequence: deduct the move's cost, run the opposed roll
    /// (rerolling ties), apply the winner's move to the loser, regenerate
    /// both sides, re-check for a finished match, and let the CPU pick its
    /// next move. A pending stun on either side preempts the clash.
    pub fn play_move(&mut self, index: usize) -> Result<TurnReport, TurnError> {
        if self.locked {
            self.log
                .push("The match is over. Reset to play again.", LogKind::System);
            return Err(TurnError::MatchOver);
        }

        let Some(player_move) = self.rules.moves.get(index).cloned() else {
            self.log
                .push(format!("No move in slot {}.", index + 1), LogKind::System);
            return Err(TurnError::UnknownMove { index });
        };

        if self.player.consume_stun() {
            self.log
                .push("Player is stunned and loses the turn!", LogKind::System);
            return Ok(self.report(TurnEvent::PlayerStunned));
        }

        if !self.player.can_afford(player_move.cost) {
            self.log.push("Not enough Light!", LogKind::System);
            return Err(TurnError::NotEnoughLight {
                cost: player_move.cost,
                available: self.player.light,
            });
        }

        self.player.spend_light(player_move.cost);

        let event = if self.cpu.consume_stun() {
            // No clash: the stunned CPU cannot contest the move
            self.log
                .push("CPU is stunned and cannot respond!", LogKind::System);
            self.log
                .push(format!("Player used {}", player_move.name), LogKind::Action);
            let effect = self.apply_move(&player_move, Side::Player);
            TurnEvent::CpuStunned {
                player_move,
                effect,
            }
        } else {
            let cpu_move = self.cpu_choice().clone();
            let rolls = opposed_roll(&mut self.dice, player_move.roll, cpu_move.roll);
            self.log.push(
                format!("Player used {} and rolled {}", player_move.name, rolls.player),
                LogKind::Action,
            );
            self.log.push(
                format!("CPU used {} and rolled {}", cpu_move.name, rolls.cpu),
                LogKind::Action,
            );

            let winner = if rolls.player_won() {
                Side::Player
            } else {
                Side::Cpu
            };
            let winning_move = match winner {
                Side::Player => &player_move,
                Side::Cpu => &cpu_move,
            };
            let effect = self.apply_move(winning_move, winner);
            TurnEvent::Clash {
                player_move,
                cpu_move,
                rolls,
                winner,
                effect,
            }
        };

        let regen = self.rules.turn_regen;
        self.player.gain_light(regen);
        self.cpu.gain_light(regen);

        self.check_match_over();
        self.choose_cpu_move();

        Ok(self.report(event))
    }

    /// Skip the turn: the player banks extra light and the CPU's chosen
    /// move lands as if it had won the roll. No per-turn regeneration.
    pub fn skip_turn(&mut self) -> Result<TurnReport, TurnError> {
        if self.locked {
            self.log
                .push("The match is over. Reset to play again.", LogKind::System);
            return Err(TurnError::MatchOver);
        }

        if self.player.consume_stun() {
            self.log
                .push("Player is stunned and loses the turn!", LogKind::System);
            return Ok(self.report(TurnEvent::PlayerStunned));
        }

        let regen = self.rules.skip_regen;
        self.player.gain_light(regen);
        self.log.push(
            format!("Player skipped their turn and regenerated {regen} Light!"),
            LogKind::Action,
        );

        let event = if self.cpu.consume_stun() {
            self.log
                .push("CPU is stunned and cannot act!", LogKind::System);
            TurnEvent::Skipped {
                cpu_move: None,
                effect: None,
            }
        } else {
            let cpu_move = self.cpu_choice().clone();
            self.log
                .push(format!("CPU attacks with {}!", cpu_move.name), LogKind::Action);
            let effect = self.apply_move(&cpu_move, Side::Cpu);
            TurnEvent::Skipped {
                cpu_move: Some(cpu_move),
                effect: Some(effect),
            }
        };

        self.check_match_over();
        self.choose_cpu_move();

        Ok(self.report(event))
    }

    /// Start a fresh match: reinitialize both combatants, clear the lock
    /// and the log, and let the CPU pick its opening move.
    pub fn reset_match(&mut self) {
        self.player = Combatant::new(self.rules.starting_health, self.rules.starting_light);
        self.cpu = Combatant::new(self.rules.starting_health, self.rules.starting_light);
        self.locked = false;
        self.outcome = None;
        self.log.clear();
        self.choose_cpu_move();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Apply the winning side's move against its opponent.
    fn apply_move(&mut self, winning_move: &Move, user: Side) -> AppliedEffect {
        let target = user.opponent();
        match winning_move.kind {
            MoveKind::Passive => {
                self.log
                    .push(format!("{user} successfully dodged!"), LogKind::Effect);
                AppliedEffect::Dodged { by: user }
            }
            MoveKind::Healing => {
                let amount = self.rules.heal_amount;
                let maximum = self.rules.max_health;
                let healed = self.combatant_mut(user).heal(amount, maximum);
                self.log
                    .push(format!("{user} healed {amount} HP!"), LogKind::Effect);
                AppliedEffect::Healed {
                    target: user,
                    amount: healed,
                }
            }
            MoveKind::Attack => {
                let damage = winning_move.damage;
                self.combatant_mut(target).take_damage(damage);
                self.log.push(
                    format!("{user} wins and deals {damage} damage!"),
                    LogKind::Effect,
                );
                AppliedEffect::Damage {
                    target,
                    amount: damage,
                }
            }
            MoveKind::Stun => {
                let damage = winning_move.damage;
                let defender = self.combatant_mut(target);
                defender.take_damage(damage);
                defender.stunned = true;
                self.log.push(
                    format!("{user} wins and deals {damage} damage!"),
                    LogKind::Effect,
                );
                self.log
                    .push(format!("{target} is stunned!"), LogKind::Effect);
                AppliedEffect::Stunned { target, damage }
            }
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Cpu => &mut self.cpu,
        }
    }

    /// Latch the lock when a side is out of health. The player is checked
    /// first, so a simultaneous knockout counts as a CPU win.
    fn check_match_over(&mut self) {
        if self.locked {
            return;
        }
        if self.player.is_defeated() {
            self.locked = true;
            self.outcome = Some(MatchOutcome::CpuWon);
            self.log.push("CPU Wins! Game Over!", LogKind::Outcome);
        } else if self.cpu.is_defeated() {
            self.locked = true;
            self.outcome = Some(MatchOutcome::PlayerWon);
            self.log.push("Player Wins! Game Over!", LogKind::Outcome);
        }
    }

    /// Pick the CPU's next move uniformly from what it can afford, topping
    /// up light until something is in range. Light strictly increases each
    /// pass, so the loop terminates once the cheapest move is reachable.
    fn choose_cpu_move(&mut self) {
        if self.locked {
            return;
        }
        loop {
            let affordable: Vec<usize> = self
                .rules
                .moves
                .iter()
                .enumerate()
                .filter(|(_, m)| self.cpu.can_afford(m.cost))
                .map(|(index, _)| index)
                .collect();

            if !affordable.is_empty() {
                let pick = self.dice.pick_index(affordable.len());
                self.cpu_choice = affordable[pick];
                return;
            }

            self.cpu.gain_light(self.rules.idle_regen);
        }
    }

    fn report(&self, event: TurnEvent) -> TurnReport {
        TurnReport {
            event,
            player: self.player.clone(),
            cpu: self.cpu.clone(),
            outcome: self.outcome,
        }
    }
}
