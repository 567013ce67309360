//! Light duel TUI application.
//!
//! A terminal duel against a CPU opponent: opposed rolls decide each
//! exchange, and every move costs light.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! automated play:
//!
//! ```bash
//! cargo run -p duel -- --headless --rules extended --seed 7
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duel_core::{DuelEngine, Profile, RuleSet, RulesError};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

const DEFAULT_PROFILE_PATH: &str = "duel_profile.json";

/// Options common to the TUI and headless modes.
pub struct LaunchOptions {
    pub headless: bool,
    pub name: Option<String>,
    pub rules: String,
    pub seed: Option<u64>,
    pub profile: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = parse_args(&args);

    if options.headless {
        return headless::run_headless(&options).map_err(|e| e.into());
    }

    // Resolve rules and build the engine before touching the terminal, so
    // failures print cleanly
    let rules = match resolve_rules(&options.rules) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: could not load rules '{}': {e}", options.rules);
            std::process::exit(1);
        }
    };
    let engine = match options.seed {
        Some(seed) => DuelEngine::seeded(rules, seed),
        None => DuelEngine::new(rules),
    };
    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: invalid rules: {e}");
            std::process::exit(1);
        }
    };

    let mut profile = Profile::load_or_default(&options.profile);
    if let Some(name) = &options.name {
        profile.set_name(name.clone());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, profile, options.profile.clone());
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = app.profile.save(&app.profile_path) {
        eprintln!("Warning: could not save profile: {e}");
    }
    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // Poll with a timeout so idle frames can advance animations
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }
    }
}

/// Turn a `--rules` value into a rule set: a built-in name first, then a
/// JSON file path.
pub fn resolve_rules(value: &str) -> Result<RuleSet, RulesError> {
    match RuleSet::named(value) {
        Some(rules) => Ok(rules),
        None => RuleSet::load(value),
    }
}

/// Parse command line options. Unknown flags are ignored and malformed
/// values fall back to defaults.
pub fn parse_args(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions {
        headless: false,
        name: None,
        rules: "classic".to_string(),
        seed: None,
        profile: PathBuf::from(DEFAULT_PROFILE_PATH),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--headless" => {
                options.headless = true;
            }
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    options.name = Some(name.clone());
                    i += 1;
                }
            }
            "--rules" => {
                if let Some(rules) = args.get(i + 1) {
                    options.rules = rules.clone();
                    i += 1;
                }
            }
            "--seed" => {
                if let Some(seed) = args.get(i + 1) {
                    options.seed = seed.parse().ok();
                    i += 1;
                }
            }
            "--profile" => {
                if let Some(path) = args.get(i + 1) {
                    options.profile = PathBuf::from(path);
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Light Duel - a turn-based duel in the terminal");
    println!();
    println!("USAGE:");
    println!("  duel [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help        Show this help message");
    println!("  --headless        Run in headless mode (text-only, no TUI)");
    println!("  --rules <RULES>   Rule set: classic, extended, or a JSON file");
    println!("                    (default: classic)");
    println!("  --seed <SEED>     Seed the dice for a reproducible match");
    println!("  --name <NAME>     Player name (default: last saved name)");
    println!("  --profile <PATH>  Profile file (default: duel_profile.json)");
    println!();
    println!("RULE SETS:");
    println!("  classic    six moves with a heal, slow light regeneration");
    println!("  extended   five moves with a stun, faster light regeneration");
    println!();
    println!("KEYS (TUI mode):");
    println!("  1-9 play a move   s skip   r rematch   j/k scroll   ? help   q quit");
    println!();
    println!("EXAMPLES:");
    println!("  duel                                   # Interactive TUI mode");
    println!("  duel --rules extended --seed 7");
    println!("  duel --headless --rules house.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(&to_args(&["duel"]));
        assert!(!options.headless);
        assert!(options.name.is_none());
        assert_eq!(options.rules, "classic");
        assert!(options.seed.is_none());
        assert_eq!(options.profile, PathBuf::from("duel_profile.json"));
    }

    #[test]
    fn test_parse_args_full() {
        let options = parse_args(&to_args(&[
            "duel",
            "--headless",
            "--name",
            "Kestrel",
            "--rules",
            "extended",
            "--seed",
            "42",
            "--profile",
            "saves/me.json",
        ]));
        assert!(options.headless);
        assert_eq!(options.name.as_deref(), Some("Kestrel"));
        assert_eq!(options.rules, "extended");
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.profile, PathBuf::from("saves/me.json"));
    }

    #[test]
    fn test_parse_args_is_lenient() {
        // Unknown flags are skipped, malformed seeds fall back to none
        let options = parse_args(&to_args(&["duel", "--frobnicate", "--seed", "banana"]));
        assert!(options.seed.is_none());
        assert_eq!(options.rules, "classic");
    }

    #[test]
    fn test_resolve_rules_builtins() {
        assert_eq!(resolve_rules("classic").unwrap().name, "classic");
        assert_eq!(resolve_rules("EXTENDED").unwrap().name, "extended");
        assert!(resolve_rules("no_such_file.json").is_err());
    }
}
