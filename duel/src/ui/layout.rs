//! Screen layout for the duel TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the battle screen.
pub struct BattleLayout {
    pub player_panel: Rect,
    pub cpu_panel: Rect,
    pub log: Rect,
    pub moves: Rect,
    pub status_bar: Rect,
}

/// Split the battle screen: combatant panels up top, the log in the
/// middle, the move list and a one-line status bar below.
pub fn battle_layout(area: Rect, move_count: usize) -> BattleLayout {
    let move_rows = move_count as u16 + 3;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(move_rows),
            Constraint::Length(1),
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    BattleLayout {
        player_panel: panels[0],
        cpu_panel: panels[1],
        log: rows[1],
        moves: rows[2],
        status_bar: rows[3],
    }
}

/// A fixed-size rectangle centered in `r`, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
