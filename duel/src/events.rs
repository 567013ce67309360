//! Event handling for the duel TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Screen};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // The help overlay swallows everything until dismissed
    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                app.show_help = false;
            }
            _ => {}
        }
        return EventResult::NeedsRedraw;
    }

    match app.screen {
        Screen::Menu => handle_menu_key(app, key),
        Screen::Battle => handle_battle_key(app, key),
    }
}

/// Keys on the name entry screen
fn handle_menu_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => {
            app.start_battle();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.insert_char(c);
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.delete_char();
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.move_cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.move_cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Esc => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

/// Keys during the battle
fn handle_battle_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Moves are numbered from 1 in display order
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < app.engine.moves().len() {
                app.play_move(index);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('s') => {
            app.skip_turn();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('r') => {
            app.reset_match();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            app.scroll_to_top();
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{DuelEngine, Profile, RuleSet};
    use std::path::PathBuf;

    fn test_app() -> App {
        let engine = DuelEngine::seeded(RuleSet::classic(), 1).unwrap();
        let mut app = App::new(engine, Profile::new("Tester"), PathBuf::from("unused.json"));
        app.screen = Screen::Battle;
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = test_app();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, event), EventResult::Quit);

        app.screen = Screen::Menu;
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, event), EventResult::Quit);
    }

    #[test]
    fn test_digit_keys_play_moves() {
        let mut app = test_app();
        let light_before = app.engine.player().light;
        handle_event(&mut app, press(KeyCode::Char('2')));
        // Quick Slash costs 3, then the turn regenerates 2
        assert_eq!(app.engine.player().light, light_before - 3 + 2);
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Char('9')));
        assert!(app.engine.log().is_empty());
    }

    #[test]
    fn test_menu_typing_builds_the_name() {
        let mut app = test_app();
        app.screen = Screen::Menu;
        app.name_buffer.clear();
        app.name_cursor = 0;

        for c in ['N', 'y', 'x'] {
            handle_event(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.name_buffer, "Nyx");

        handle_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.name_buffer, "Ny");
    }

    #[test]
    fn test_help_overlay_swallows_battle_keys() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);

        // A digit that would normally play a move does nothing now
        handle_event(&mut app, press(KeyCode::Char('1')));
        assert!(app.engine.log().is_empty());

        handle_event(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Up));
        assert!(!app.scroll_locked_to_bottom);
        handle_event(&mut app, press(KeyCode::Char('G')));
        assert!(app.scroll_locked_to_bottom);
    }
}
