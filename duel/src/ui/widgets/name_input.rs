//! Name entry widget for the menu screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::DuelTheme;

/// The menu box: a name prompt with a visible cursor, the player's
/// record, and a start hint that only appears once a name is present.
pub struct NameInputWidget<'a> {
    buffer: &'a str,
    cursor: usize,
    record: (u32, u32),
    can_start: bool,
    theme: &'a DuelTheme,
}

impl<'a> NameInputWidget<'a> {
    pub fn new(buffer: &'a str, cursor: usize, theme: &'a DuelTheme) -> Self {
        Self {
            buffer,
            cursor,
            record: (0, 0),
            can_start: false,
            theme,
        }
    }

    pub fn record(mut self, wins: u32, losses: u32) -> Self {
        self.record = (wins, losses);
        self
    }

    pub fn can_start(mut self, can_start: bool) -> Self {
        self.can_start = can_start;
        self
    }
}

impl Widget for NameInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Light Duel ", self.theme.title_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        // Split the buffer around the cursor so the cell under it can be
        // rendered reversed
        let chars: Vec<char> = self.buffer.chars().collect();
        let cursor = self.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at: String = chars
            .get(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if cursor < chars.len() {
            chars[cursor + 1..].iter().collect()
        } else {
            String::new()
        };

        let input_line = Line::from(vec![
            Span::styled("> ", self.theme.title_style()),
            Span::styled(before, self.theme.text_style()),
            Span::styled(at, self.theme.text_style().add_modifier(Modifier::REVERSED)),
            Span::styled(after, self.theme.text_style()),
        ]);

        let (wins, losses) = self.record;
        let hint = if self.can_start {
            Span::styled("Press Enter to start the duel", self.theme.text_style())
        } else {
            Span::styled("Type a name to enable start", self.theme.muted_style())
        };

        let lines = vec![
            Line::from(Span::styled("Enter your name:", self.theme.text_style())),
            input_line,
            Line::from(""),
            Line::from(Span::styled(
                format!("Record: {wins}W / {losses}L"),
                self.theme.muted_style(),
            )),
            Line::from(hint),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
