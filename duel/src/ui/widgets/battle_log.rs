//! Scrolling battle log widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use duel_core::BattleLog;

use crate::ui::theme::DuelTheme;

/// The turn-by-turn account of the match, styled by entry kind.
pub struct BattleLogWidget<'a> {
    log: &'a BattleLog,
    theme: &'a DuelTheme,
    scroll: usize,
    locked_to_bottom: bool,
    flash: bool,
}

impl<'a> BattleLogWidget<'a> {
    pub fn new(log: &'a BattleLog, theme: &'a DuelTheme) -> Self {
        Self {
            log,
            theme,
            scroll: 0,
            locked_to_bottom: true,
            flash: false,
        }
    }

    pub fn scroll(mut self, scroll: usize, locked_to_bottom: bool) -> Self {
        self.scroll = scroll;
        self.locked_to_bottom = locked_to_bottom;
        self
    }

    pub fn flash(mut self, flash: bool) -> Self {
        self.flash = flash;
        self
    }
}

impl Widget for BattleLogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.flash {
            self.theme.flash_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .title(" Battle Log ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let entries = self.log.entries();
        if entries.is_empty() {
            let placeholder = Line::from("The duel awaits. Choose a move.");
            Paragraph::new(placeholder)
                .style(self.theme.muted_style())
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let max_scroll = entries.len().saturating_sub(height);
        let start = if self.locked_to_bottom {
            max_scroll
        } else {
            self.scroll.min(max_scroll)
        };
        let end = (start + height).min(entries.len());

        let lines: Vec<Line> = entries[start..end]
            .iter()
            .map(|entry| {
                Line::styled(entry.message.clone(), self.theme.log_style(entry.kind))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);

        if entries.len() > height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(start);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            StatefulWidget::render(scrollbar, area, buf, &mut scrollbar_state);
        }
    }
}
