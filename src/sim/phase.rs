//! Game mode state machine
//!
//! Every mode change goes through [`transition`]. A `None` result means the
//! trigger is not legal in the current mode and must be ignored.

use serde::{Deserialize, Serialize};

/// Current mode of the game. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty selection, no session
    #[default]
    Menu,
    /// Simulation advancing every tick
    Playing,
    /// Simulation frozen, session preserved
    Paused,
    /// All lives lost
    GameOver,
    /// Every brick destroyed
    Win,
}

impl GamePhase {
    /// Whether a session exists to be drawn in this mode
    pub fn has_session(&self) -> bool {
        !matches!(self, GamePhase::Menu)
    }

    /// Modes that show the Restart / Menu overlay
    pub fn shows_overlay(&self) -> bool {
        matches!(self, GamePhase::Paused | GamePhase::GameOver | GamePhase::Win)
    }
}

/// Triggers that can move the game between modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A difficulty was picked from the menu
    Start,
    Pause,
    Resume,
    /// Start over with the last selected difficulty
    Restart,
    ToMenu,
    /// Simulation event: the last life was lost
    LivesExhausted,
    /// Simulation event: every brick was destroyed
    BricksCleared,
}

/// Resolve a trigger against the current mode
pub fn transition(from: GamePhase, trigger: Transition) -> Option<GamePhase> {
    use GamePhase::*;
    use Transition::*;

    match (from, trigger) {
        (Menu, Start) => Some(Playing),
        (Playing, LivesExhausted) => Some(GameOver),
        (Playing, BricksCleared) => Some(Win),
        (Playing, Pause) => Some(Paused),
        (Paused, Resume) => Some(Playing),
        (Paused | GameOver | Win, Restart) => Some(Playing),
        (Paused | GameOver | Win, ToMenu) => Some(Menu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [GamePhase; 5] = [
        GamePhase::Menu,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::GameOver,
        GamePhase::Win,
    ];

    const TRIGGERS: [Transition; 7] = [
        Transition::Start,
        Transition::Pause,
        Transition::Resume,
        Transition::Restart,
        Transition::ToMenu,
        Transition::LivesExhausted,
        Transition::BricksCleared,
    ];

    #[test]
    fn test_legal_transition_count() {
        let legal = PHASES
            .iter()
            .flat_map(|&p| TRIGGERS.iter().map(move |&t| transition(p, t)))
            .filter(Option::is_some)
            .count();
        // 1 from Menu, 3 from Playing, 3 from Paused, 2 each from GameOver and Win
        assert_eq!(legal, 11);
    }

    #[test]
    fn test_menu_only_starts() {
        assert_eq!(transition(GamePhase::Menu, Transition::Start), Some(GamePhase::Playing));
        for t in TRIGGERS.iter().filter(|&&t| t != Transition::Start) {
            assert_eq!(transition(GamePhase::Menu, *t), None, "{t:?}");
        }
    }

    #[test]
    fn test_pause_resume() {
        assert_eq!(transition(GamePhase::Playing, Transition::Pause), Some(GamePhase::Paused));
        assert_eq!(transition(GamePhase::Paused, Transition::Resume), Some(GamePhase::Playing));
        assert_eq!(transition(GamePhase::Paused, Transition::Pause), None);
        assert_eq!(transition(GamePhase::Playing, Transition::Resume), None);
    }

    #[test]
    fn test_terminal_modes() {
        for p in [GamePhase::GameOver, GamePhase::Win] {
            assert_eq!(transition(p, Transition::Restart), Some(GamePhase::Playing));
            assert_eq!(transition(p, Transition::ToMenu), Some(GamePhase::Menu));
            assert_eq!(transition(p, Transition::Resume), None);
            assert_eq!(transition(p, Transition::Pause), None);
        }
    }

    #[test]
    fn test_mode_flags() {
        for p in PHASES {
            assert_eq!(p.has_session(), p != GamePhase::Menu, "{p:?}");
        }
        assert!(GamePhase::Paused.shows_overlay());
        assert!(GamePhase::Win.shows_overlay());
        assert!(!GamePhase::Playing.shows_overlay());
        assert!(!GamePhase::Menu.shows_overlay());
    }

    #[test]
    fn test_playing_cannot_restart() {
        assert_eq!(transition(GamePhase::Playing, Transition::Restart), None);
        assert_eq!(transition(GamePhase::Playing, Transition::ToMenu), None);
    }
}
