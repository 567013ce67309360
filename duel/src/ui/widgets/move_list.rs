//! Move list widget: the player's numbered options for the turn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use duel_core::Move;

use crate::ui::theme::DuelTheme;

/// The numbered move catalog. Moves the player cannot pay for right now
/// are dimmed, as is the whole list once the match is over.
pub struct MoveListWidget<'a> {
    moves: &'a [Move],
    light: i32,
    locked: bool,
    theme: &'a DuelTheme,
}

impl<'a> MoveListWidget<'a> {
    pub fn new(moves: &'a [Move], theme: &'a DuelTheme) -> Self {
        Self {
            moves,
            light: 0,
            locked: false,
            theme,
        }
    }

    /// The player's current light, for affordability dimming.
    pub fn light(mut self, light: i32) -> Self {
        self.light = light;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

impl Widget for MoveListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Moves ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = self
            .moves
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let playable = !self.locked && m.cost <= self.light;
                let style = if playable {
                    self.theme.text_style()
                } else {
                    self.theme.muted_style()
                };
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), self.theme.title_style()),
                    Span::styled(m.to_string(), style),
                ])
            })
            .collect();

        lines.push(Line::from(Span::styled(
            "s skip turn   r rematch   ? help   q quit",
            self.theme.muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
