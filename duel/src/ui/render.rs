//! Render orchestration for the duel TUI.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use duel_core::{LogKind, MatchOutcome, Side};

use crate::app::{App, Screen};
use crate::ui::layout::{battle_layout, centered_rect_fixed};
use crate::ui::theme::DuelTheme;
use crate::ui::widgets::{BattleLogWidget, CombatantPanel, MoveListWidget, NameInputWidget};

/// Render the whole interface for one frame.
pub fn render(f: &mut Frame, app: &App) {
    let theme = DuelTheme::default();
    match app.screen {
        Screen::Menu => render_menu(f, app, &theme),
        Screen::Battle => render_battle(f, app, &theme),
    }

    if app.show_help {
        render_help_overlay(f, &theme);
    }
}

fn render_menu(f: &mut Frame, app: &App, theme: &DuelTheme) {
    let area = f.area();
    let box_area = centered_rect_fixed(46, 7, area);
    let widget = NameInputWidget::new(&app.name_buffer, app.name_cursor, theme)
        .record(app.profile.wins, app.profile.losses)
        .can_start(app.can_start());
    f.render_widget(widget, box_area);

    let status_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
    render_status_line(f, status_area, app, theme, "Enter start   Esc quit");
}

fn render_battle(f: &mut Frame, app: &App, theme: &DuelTheme) {
    let layout = battle_layout(f.area(), app.engine.moves().len());
    let max_health = app.engine.rules().max_health;
    let flash = app.flash_active();

    let player_panel = CombatantPanel::new(
        app.engine.player(),
        app.profile.display_name(),
        Side::Player,
        theme,
        max_health,
    )
    .roll(app.last_rolls.map(|r| r.player))
    .record(Some((app.profile.wins, app.profile.losses)))
    .flash(flash);
    f.render_widget(player_panel, layout.player_panel);

    // Hide the declared move once the match is decided
    let intent = if app.engine.is_locked() {
        None
    } else {
        Some(app.engine.cpu_choice())
    };
    let cpu_panel = CombatantPanel::new(app.engine.cpu(), "CPU", Side::Cpu, theme, max_health)
        .intent(intent)
        .roll(app.last_rolls.map(|r| r.cpu))
        .flash(flash);
    f.render_widget(cpu_panel, layout.cpu_panel);

    let log = BattleLogWidget::new(app.engine.log(), theme)
        .scroll(app.log_scroll, app.scroll_locked_to_bottom)
        .flash(flash);
    f.render_widget(log, layout.log);

    let moves = MoveListWidget::new(app.engine.moves(), theme)
        .light(app.engine.player().light)
        .locked(app.engine.is_locked());
    f.render_widget(moves, layout.moves);

    let hint = format!(
        "1-{} play a move   s skip   j/k scroll   ? help",
        app.engine.moves().len()
    );
    render_status_line(f, layout.status_bar, app, theme, &hint);

    if let Some(outcome) = app.engine.outcome() {
        render_game_over(f, app, outcome, theme);
    }
}

fn render_status_line(f: &mut Frame, area: Rect, app: &App, theme: &DuelTheme, hint: &str) {
    let line = match app.status_message() {
        Some(status) => Line::from(Span::styled(status.to_string(), theme.text_style())),
        None => Line::from(Span::styled(hint.to_string(), theme.muted_style())),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_game_over(f: &mut Frame, app: &App, outcome: MatchOutcome, theme: &DuelTheme) {
    let area = centered_rect_fixed(38, 7, f.area());
    f.render_widget(Clear, area);

    let message = match outcome {
        MatchOutcome::PlayerWon => "Player Wins! Game Over!",
        MatchOutcome::CpuWon => "CPU Wins! Game Over!",
    };
    let block = Block::default()
        .title(" Game Over ")
        .borders(Borders::ALL)
        .border_style(theme.flash_border_style());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme.log_style(LogKind::Outcome))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Record: {}W / {}L", app.profile.wins, app.profile.losses),
            theme.muted_style(),
        )),
        Line::from(Span::styled("r rematch   q quit", theme.text_style())),
    ];
    f.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

fn render_help_overlay(f: &mut Frame, theme: &DuelTheme) {
    let area = centered_rect_fixed(48, 13, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let keys: [(&str, &str); 8] = [
        ("1-9", "play the numbered move"),
        ("s", "skip the turn and bank light"),
        ("r", "restart the match"),
        ("j/k, Up/Down", "scroll the battle log"),
        ("g / G", "jump to the top / bottom"),
        ("PgUp/PgDn", "scroll faster"),
        ("?", "toggle this help"),
        ("q, Ctrl+C", "quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:<14}"), theme.title_style()),
                Span::styled(what.to_string(), theme.text_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
