//! Application state for the duel TUI.

use std::path::PathBuf;

use duel_core::{DuelEngine, OpposedRoll, Profile, TurnEvent, TurnReport};

/// How many idle ticks a freshly resolved turn keeps its highlight.
const FLASH_TICKS: u8 = 6;

/// Rough battle log viewport height, used to decide when scrolling down
/// should re-lock to the live tail.
const LOG_VIEW_ESTIMATE: usize = 12;

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Name entry; the duel cannot start until a name is present.
    Menu,
    Battle,
}

/// Main application state.
pub struct App {
    pub engine: DuelEngine,
    pub profile: Profile,
    pub profile_path: PathBuf,
    pub screen: Screen,

    /// Name entry buffer on the menu screen.
    pub name_buffer: String,
    /// Cursor position in the name buffer, counted in characters.
    pub name_cursor: usize,

    /// Index of the first visible battle log line when not locked.
    pub log_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    /// Rolls from the most recent clash, shown on the combatant panels.
    pub last_rolls: Option<OpposedRoll>,
    flash_ticks: u8,

    pub show_help: bool,
    status_message: Option<String>,
}

impl App {
    pub fn new(engine: DuelEngine, profile: Profile, profile_path: PathBuf) -> Self {
        let name_buffer = profile.name.clone();
        let name_cursor = name_buffer.chars().count();
        Self {
            engine,
            profile,
            profile_path,
            screen: Screen::Menu,
            name_buffer,
            name_cursor,
            log_scroll: 0,
            scroll_locked_to_bottom: true,
            last_rolls: None,
            flash_ticks: 0,
            show_help: false,
            status_message: None,
        }
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // =========================================================================
    // Menu screen
    // =========================================================================

    /// The duel can only start once a non-blank name has been entered.
    pub fn can_start(&self) -> bool {
        !self.name_buffer.trim().is_empty()
    }

    /// Leave the menu: persist the chosen name and switch to the battle.
    pub fn start_battle(&mut self) {
        if !self.can_start() {
            self.set_status("Enter a name to start");
            return;
        }
        self.profile.set_name(self.name_buffer.clone());
        match self.profile.save(&self.profile_path) {
            Ok(()) => self.set_status(format!("Welcome, {}!", self.profile.display_name())),
            Err(e) => self.set_status(format!("Profile save failed: {e}")),
        }
        self.screen = Screen::Battle;
    }

    /// Insert a character at the cursor, unicode-safe.
    pub fn insert_char(&mut self, c: char) {
        let byte_index = self
            .name_buffer
            .char_indices()
            .nth(self.name_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.name_buffer.len());
        self.name_buffer.insert(byte_index, c);
        self.name_cursor += 1;
    }

    /// Delete the character before the cursor, unicode-safe.
    pub fn delete_char(&mut self) {
        if self.name_cursor == 0 {
            return;
        }
        let byte_index = self
            .name_buffer
            .char_indices()
            .nth(self.name_cursor - 1)
            .map(|(i, _)| i)
            .unwrap_or(self.name_buffer.len());
        self.name_buffer.remove(byte_index);
        self.name_cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.name_cursor = self.name_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.name_buffer.chars().count();
        if self.name_cursor < len {
            self.name_cursor += 1;
        }
    }

    // =========================================================================
    // Battle screen
    // =========================================================================

    pub fn play_move(&mut self, index: usize) {
        match self.engine.play_move(index) {
            Ok(report) => self.absorb_report(report),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn skip_turn(&mut self) {
        match self.engine.skip_turn() {
            Ok(report) => self.absorb_report(report),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn reset_match(&mut self) {
        self.engine.reset_match();
        self.last_rolls = None;
        self.flash_ticks = 0;
        self.log_scroll = 0;
        self.scroll_locked_to_bottom = true;
        self.set_status("New match started");
    }

    /// Fold a resolved turn into the display state and the profile tally.
    fn absorb_report(&mut self, report: TurnReport) {
        self.clear_status();
        self.last_rolls = match &report.event {
            TurnEvent::Clash { rolls, .. } => Some(*rolls),
            _ => None,
        };
        self.flash_ticks = FLASH_TICKS;

        if let Some(outcome) = report.outcome {
            self.profile.record(outcome);
            if let Err(e) = self.profile.save(&self.profile_path) {
                self.set_status(format!("Profile save failed: {e}"));
            } else if outcome.winner() == duel_core::Side::Player {
                self.set_status("Victory! Press r for a rematch");
            } else {
                self.set_status("Defeated. Press r for a rematch");
            }
        }
    }

    /// True while the latest turn should still be highlighted.
    pub fn flash_active(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Advance idle animations. Called when no input arrived this poll.
    pub fn tick(&mut self) {
        if self.flash_ticks > 0 {
            self.flash_ticks -= 1;
        }
    }

    // =========================================================================
    // Battle log scrolling
    // =========================================================================

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_locked_to_bottom = false;
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let len = self.engine.log().len();
        self.log_scroll = (self.log_scroll + lines).min(len.saturating_sub(1));
        if self.log_scroll >= self.estimate_max_scroll() {
            self.scroll_to_bottom();
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_locked_to_bottom = true;
        self.log_scroll = self.estimate_max_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_locked_to_bottom = false;
        self.log_scroll = 0;
    }

    fn estimate_max_scroll(&self) -> usize {
        self.engine.log().len().saturating_sub(LOG_VIEW_ESTIMATE)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::RuleSet;

    fn test_app() -> App {
        let engine = DuelEngine::seeded(RuleSet::classic(), 1).unwrap();
        App::new(engine, Profile::default(), PathBuf::from("test_profile.json"))
    }

    #[test]
    fn test_menu_gate_requires_a_name() {
        let mut app = test_app();
        app.name_buffer.clear();
        app.name_cursor = 0;
        assert!(!app.can_start());

        app.start_battle();
        assert_eq!(app.screen, Screen::Menu);

        for c in "Aria".chars() {
            app.insert_char(c);
        }
        assert!(app.can_start());
    }

    #[test]
    fn test_name_editing_is_unicode_safe() {
        let mut app = test_app();
        app.name_buffer.clear();
        app.name_cursor = 0;

        for c in "héro".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.name_buffer, "héro");

        app.move_cursor_left();
        app.move_cursor_left();
        app.delete_char();
        assert_eq!(app.name_buffer, "hro");

        app.move_cursor_right();
        app.insert_char('!');
        assert_eq!(app.name_buffer, "hr!o");
    }

    #[test]
    fn test_scrolling_unlocks_and_relocks() {
        let mut app = test_app();
        assert!(app.scroll_locked_to_bottom);

        app.scroll_up(1);
        assert!(!app.scroll_locked_to_bottom);

        app.scroll_to_bottom();
        assert!(app.scroll_locked_to_bottom);
    }

    #[test]
    fn test_failed_move_sets_a_status() {
        let mut app = test_app();
        app.screen = Screen::Battle;

        // Blitz costs 15 against 10 starting light
        app.play_move(4);
        assert!(app.status_message().unwrap().contains("Not enough light"));
    }

    #[test]
    fn test_flash_decays_with_ticks() {
        let mut app = test_app();
        app.screen = Screen::Battle;
        app.play_move(1);
        assert!(app.flash_active());

        for _ in 0..10 {
            app.tick();
        }
        assert!(!app.flash_active());
    }
}
