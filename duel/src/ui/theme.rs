//! Color theme for the duel TUI.

use duel_core::LogKind;
use ratatui::style::{Color, Modifier, Style};

/// Colors used across the interface.
///
/// A single place to retune the palette; widgets never name raw colors.
pub struct DuelTheme {
    pub border: Color,
    pub border_flash: Color,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub player: Color,
    pub cpu: Color,
    pub light: Color,
    pub healthy: Color,
    pub wounded: Color,
    pub critical: Color,
    pub effect: Color,
    pub outcome: Color,
}

impl Default for DuelTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_flash: Color::Cyan,
            title: Color::Cyan,
            text: Color::Gray,
            muted: Color::DarkGray,
            player: Color::Cyan,
            cpu: Color::Red,
            light: Color::Yellow,
            healthy: Color::Green,
            wounded: Color::Yellow,
            critical: Color::Red,
            effect: Color::LightYellow,
            outcome: Color::Magenta,
        }
    }
}

impl DuelTheme {
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border style for a panel highlighting a freshly resolved turn.
    pub fn flash_border_style(&self) -> Style {
        Style::default().fg(self.border_flash)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn side_style(&self, is_player: bool) -> Style {
        let color = if is_player { self.player } else { self.cpu };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Health bar color by remaining fraction: healthy above four fifths,
    /// wounded above two fifths, critical below.
    pub fn health_color(&self, ratio: f64) -> Color {
        if ratio >= 0.8 {
            self.healthy
        } else if ratio >= 0.4 {
            self.wounded
        } else {
            self.critical
        }
    }

    pub fn health_gauge_style(&self, ratio: f64) -> Style {
        Style::default().fg(self.health_color(ratio))
    }

    pub fn light_style(&self) -> Style {
        Style::default().fg(self.light)
    }

    /// Style for a battle log line by its kind.
    pub fn log_style(&self, kind: LogKind) -> Style {
        match kind {
            LogKind::Action => Style::default().fg(self.text),
            LogKind::Effect => Style::default().fg(self.effect),
            LogKind::System => Style::default()
                .fg(self.muted)
                .add_modifier(Modifier::ITALIC),
            LogKind::Outcome => Style::default()
                .fg(self.outcome)
                .add_modifier(Modifier::BOLD),
        }
    }
}
