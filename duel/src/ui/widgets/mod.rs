//! TUI widgets for the duel

pub mod battle_log;
pub mod combatant_panel;
pub mod move_list;
pub mod name_input;

pub use battle_log::BattleLogWidget;
pub use combatant_panel::CombatantPanel;
pub use move_list::MoveListWidget;
pub use name_input::NameInputWidget;
