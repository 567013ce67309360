//! Combatant panel widget: health gauge, light, and per-side extras.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use duel_core::{Combatant, Move, Side};

use crate::ui::theme::DuelTheme;

/// One side of the duel: name, health bar, light, stun state, and either
/// the CPU's declared move or the player's running record.
pub struct CombatantPanel<'a> {
    combatant: &'a Combatant,
    name: &'a str,
    side: Side,
    theme: &'a DuelTheme,
    max_health: i32,
    intent: Option<&'a Move>,
    roll: Option<i32>,
    record: Option<(u32, u32)>,
    flash: bool,
}

impl<'a> CombatantPanel<'a> {
    pub fn new(
        combatant: &'a Combatant,
        name: &'a str,
        side: Side,
        theme: &'a DuelTheme,
        max_health: i32,
    ) -> Self {
        Self {
            combatant,
            name,
            side,
            theme,
            max_health,
            intent: None,
            roll: None,
            record: None,
            flash: false,
        }
    }

    /// The move the CPU has declared for this turn.
    pub fn intent(mut self, intent: Option<&'a Move>) -> Self {
        self.intent = intent;
        self
    }

    /// This side's roll from the latest clash.
    pub fn roll(mut self, roll: Option<i32>) -> Self {
        self.roll = roll;
        self
    }

    /// Win/loss tally, shown on the player's panel.
    pub fn record(mut self, record: Option<(u32, u32)>) -> Self {
        self.record = record;
        self
    }

    pub fn flash(mut self, flash: bool) -> Self {
        self.flash = flash;
        self
    }
}

impl Widget for CombatantPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.flash {
            self.theme.flash_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.name),
                self.theme.side_style(self.side == Side::Player),
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // health gauge
                Constraint::Length(1), // light
                Constraint::Length(1), // roll
                Constraint::Length(1), // stun
                Constraint::Min(0),    // intent or record
            ])
            .split(inner);

        let ratio = self.combatant.health_ratio(self.max_health);
        let gauge = Gauge::default()
            .block(Block::default())
            .gauge_style(self.theme.health_gauge_style(ratio as f64))
            .ratio(ratio as f64)
            .label(format!(
                "HP: {}/{}",
                self.combatant.health, self.max_health
            ));
        gauge.render(chunks[0], buf);

        let light_line = Line::from(vec![
            Span::raw("Light: "),
            Span::styled(
                format!("{}", self.combatant.light),
                self.theme.light_style().add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(light_line).render(chunks[1], buf);

        if let Some(roll) = self.roll {
            let roll_line = Line::from(vec![
                Span::styled("Rolled: ", self.theme.muted_style()),
                Span::styled(format!("{roll}"), self.theme.text_style()),
            ]);
            Paragraph::new(roll_line).render(chunks[2], buf);
        }

        if self.combatant.stunned {
            let stun_line = Line::from(Span::styled(
                "Stunned!",
                Style::default()
                    .fg(self.theme.critical)
                    .add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(stun_line).render(chunks[3], buf);
        }

        if chunks[4].height > 0 {
            if let Some(intent) = self.intent {
                let intent_line = Line::from(vec![
                    Span::raw("CPU chose: "),
                    Span::styled(
                        intent.name.clone(),
                        self.theme.side_style(self.side == Side::Player),
                    ),
                ]);
                Paragraph::new(intent_line).render(chunks[4], buf);
            } else if let Some((wins, losses)) = self.record {
                let record_line = Line::from(Span::styled(
                    format!("Record: {wins}W / {losses}L"),
                    self.theme.muted_style(),
                ));
                Paragraph::new(record_line).render(chunks[4], buf);
            }
        }
    }
}
