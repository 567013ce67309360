//! Headless mode for the duel.
//!
//! A line-oriented interface for running matches without a TUI. It's
//! designed for scripted play and automated testing: every input line is
//! a command, and every output line carries a bracketed tag.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use duel_core::{DuelEngine, LogKind, MatchOutcome, Profile, RulesError, TurnError, TurnReport};

use crate::LaunchOptions;

/// A headless match plus the profile it reports into.
pub struct HeadlessSession {
    engine: DuelEngine,
    profile: Profile,
    profile_path: PathBuf,
}

impl HeadlessSession {
    pub fn new(options: &LaunchOptions) -> Result<Self, RulesError> {
        let rules = crate::resolve_rules(&options.rules)?;
        let engine = match options.seed {
            Some(seed) => DuelEngine::seeded(rules, seed)?,
            None => DuelEngine::new(rules)?,
        };
        let mut profile = Profile::load_or_default(&options.profile);
        if let Some(name) = &options.name {
            profile.set_name(name.clone());
        }
        Ok(Self {
            engine,
            profile,
            profile_path: options.profile.clone(),
        })
    }

    fn greet(&self) {
        println!("=== Light Duel Headless Mode ===");
        if self.profile.matches_played() > 0 {
            println!(
                "Fighter: {} ({} wins, {} losses)",
                self.profile.display_name(),
                self.profile.wins,
                self.profile.losses
            );
        } else {
            println!("Fighter: {}", self.profile.display_name());
        }
        println!(
            "Rules: {} ({} moves)",
            self.engine.rules().name,
            self.engine.moves().len()
        );
        println!();
        print_command_list();
        println!();
        print_moves(&self.engine);
        println!();
        print_status(&self.engine);
        print_intent(&self.engine);
    }

    /// Handle one input line. Returns `false` once the session should end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                return false;
            }
            "help" | "?" => {
                println!("[HELP]");
                print_command_list();
            }
            "status" => print_status(&self.engine),
            "moves" => print_moves(&self.engine),
            "skip" | "s" => {
                let result = self.engine.skip_turn();
                self.report_turn(result);
            }
            "reset" | "r" => {
                self.engine.reset_match();
                println!("[SYSTEM] New match started.");
                print_status(&self.engine);
                print_intent(&self.engine);
            }
            "move" | "play" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(number) if number >= 1 => self.play(number - 1),
                _ => println!("[ERROR] Usage: move <number>"),
            },
            token => match token.parse::<usize>() {
                Ok(number) if number >= 1 => self.play(number - 1),
                _ => println!("[ERROR] Unknown command. Type help for a list."),
            },
        }

        true
    }

    fn play(&mut self, index: usize) {
        let result = self.engine.play_move(index);
        self.report_turn(result);
    }

    /// Print everything a turn produced and fold a finished match into the
    /// profile.
    fn report_turn(&mut self, result: Result<TurnReport, TurnError>) {
        for entry in self.engine.drain_log() {
            println!("[{}] {}", kind_tag(entry.kind), entry.message);
        }
        match result {
            Ok(report) => {
                if let Some(outcome) = report.outcome {
                    self.record_outcome(outcome);
                }
                print_status(&self.engine);
                print_intent(&self.engine);
            }
            Err(e) => println!("[ERROR] {e}"),
        }
    }

    fn record_outcome(&mut self, outcome: MatchOutcome) {
        self.profile.record(outcome);
        match self.profile.save(&self.profile_path) {
            Ok(()) => println!(
                "[PROFILE] {}: {} wins, {} losses",
                self.profile.display_name(),
                self.profile.wins,
                self.profile.losses
            ),
            Err(e) => println!("[ERROR] Profile save failed: {e}"),
        }
    }
}

/// Run the duel in headless mode until stdin closes or `quit` arrives.
pub fn run_headless(options: &LaunchOptions) -> Result<(), RulesError> {
    let mut session = HeadlessSession::new(options)?;
    session.greet();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        if !session.handle_line(&line) {
            break;
        }

        stdout.flush().ok();
    }

    Ok(())
}

fn kind_tag(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Action => "ACTION",
        LogKind::Effect => "EFFECT",
        LogKind::System => "SYSTEM",
        LogKind::Outcome => "OUTCOME",
    }
}

fn print_status(engine: &DuelEngine) {
    let player = engine.player();
    let cpu = engine.cpu();
    let max = engine.rules().max_health;
    println!(
        "[STATUS] Player {}/{} HP, {} Light{} | CPU {}/{} HP, {} Light{}",
        player.health,
        max,
        player.light,
        if player.stunned { ", stunned" } else { "" },
        cpu.health,
        max,
        cpu.light,
        if cpu.stunned { ", stunned" } else { "" },
    );
}

/// The CPU's declared move, hidden once the match is over.
fn print_intent(engine: &DuelEngine) {
    if !engine.is_locked() {
        println!("[CPU] CPU chose: {}", engine.cpu_choice().name);
    }
}

fn print_moves(engine: &DuelEngine) {
    println!("[MOVES]");
    for (i, m) in engine.moves().iter().enumerate() {
        println!("  {}. {m}", i + 1);
    }
}

fn print_command_list() {
    println!("Commands:");
    println!("  <n> or move <n> - Play move n");
    println!("  skip            - Skip the turn and bank light");
    println!("  reset           - Restart the match");
    println!("  status          - Show both fighters");
    println!("  moves           - List the move catalog");
    println!("  help            - Show this help");
    println!("  quit            - Exit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{Move, RollRange, RuleSet};
    use tempfile::TempDir;

    fn options_with(profile: PathBuf) -> LaunchOptions {
        LaunchOptions {
            headless: true,
            name: None,
            rules: "classic".to_string(),
            seed: Some(1),
            profile,
        }
    }

    #[test]
    fn test_session_name_defaults_to_saved_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        Profile::new("Kestrel").save(&path).unwrap();

        let session = HeadlessSession::new(&options_with(path)).unwrap();
        assert_eq!(session.profile.display_name(), "Kestrel");
    }

    #[test]
    fn test_name_flag_overrides_saved_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        Profile::new("Kestrel").save(&path).unwrap();

        let mut options = options_with(path);
        options.name = Some("Aria".to_string());
        let mut session = HeadlessSession::new(&options).unwrap();
        assert_eq!(session.profile.display_name(), "Aria");

        assert!(session.handle_line("status"));
        assert!(!session.handle_line("quit"));
    }

    #[test]
    fn test_finished_match_updates_the_profile() {
        let dir = TempDir::new().unwrap();
        let profile_path = dir.path().join("profile.json");
        let rules_path = dir.path().join("sudden_death.json");

        // One cheap attack and 5 starting health: any landed hit ends it
        RuleSet::classic()
            .with_name("sudden death")
            .with_moves(vec![Move::attack("Jab", 0, RollRange::new(1, 6), 10)])
            .with_starting_health(5)
            .save(&rules_path)
            .unwrap();

        let mut options = options_with(profile_path.clone());
        options.name = Some("Kestrel".to_string());
        options.rules = rules_path.to_string_lossy().into_owned();
        let mut session = HeadlessSession::new(&options).unwrap();

        // Skipping lets the CPU's only move land unopposed
        assert!(session.handle_line("skip"));
        assert_eq!(session.engine.outcome(), Some(MatchOutcome::CpuWon));

        let saved = Profile::load(&profile_path).unwrap();
        assert_eq!(saved.name, "Kestrel");
        assert_eq!(saved.losses, 1);
        assert_eq!(saved.wins, 0);
    }
}
