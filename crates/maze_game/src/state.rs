//! Game mode state machine.
//!
//! ```text
//!   MainMenu --LevelReady--> Playing <--PauseToggled/ResumeRequested--> Paused
//!                               |
//!                               +--AllLevelsCompleted--> Completed --RestartRequested--> MainMenu
//! ```
//!
//! The machine only decides modes. Side effects (timer, loads, menus) belong to
//! the session, which acts on the returned [`Transition`]. Triggers that make no
//! sense in the current mode are ignored.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    Completed,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A requested maze finished loading.
    LevelReady,
    PauseToggled,
    ResumeRequested,
    AllLevelsCompleted,
    RestartRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
}

#[derive(Debug, Default)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Physics, collision and progression run only while playing.
    pub fn simulation_enabled(&self) -> bool {
        self.state == GameState::Playing
    }

    /// Applies `trigger`. Returns the transition when the mode changed.
    pub fn handle(&mut self, trigger: Trigger) -> Option<Transition> {
        use GameState::*;

        let next = match (self.state, trigger) {
            (MainMenu, Trigger::LevelReady) => Playing,
            (Playing, Trigger::PauseToggled) => Paused,
            (Paused, Trigger::PauseToggled | Trigger::ResumeRequested) => Playing,
            (Playing, Trigger::AllLevelsCompleted) => Completed,
            (Completed, Trigger::RestartRequested) => MainMenu,
            (state, trigger) => {
                log::debug!("Ignoring {:?} while {}", trigger, state);
                return None;
            }
        };

        let transition = Transition {
            from: self.state,
            to: next,
        };
        self.state = next;
        log::info!("Game state: {} -> {}", transition.from, transition.to);
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in(state: GameState) -> GameStateMachine {
        GameStateMachine { state }
    }

    #[test]
    fn starts_in_main_menu() {
        let machine = GameStateMachine::new();
        assert_eq!(machine.state(), GameState::MainMenu);
        assert!(!machine.simulation_enabled());
    }

    #[test]
    fn level_ready_starts_play() {
        let mut machine = GameStateMachine::new();
        let t = machine.handle(Trigger::LevelReady).expect("should transition");
        assert_eq!(t, Transition { from: GameState::MainMenu, to: GameState::Playing });
        assert!(machine.simulation_enabled());
    }

    #[test]
    fn pause_toggles_between_playing_and_paused() {
        let mut machine = machine_in(GameState::Playing);
        machine.handle(Trigger::PauseToggled);
        assert_eq!(machine.state(), GameState::Paused);
        assert!(!machine.simulation_enabled());
        machine.handle(Trigger::PauseToggled);
        assert_eq!(machine.state(), GameState::Playing);
    }

    #[test]
    fn resume_only_leaves_paused() {
        let mut machine = machine_in(GameState::Paused);
        assert!(machine.handle(Trigger::ResumeRequested).is_some());
        assert_eq!(machine.state(), GameState::Playing);
        assert!(machine.handle(Trigger::ResumeRequested).is_none());
    }

    #[test]
    fn pause_is_ignored_outside_play() {
        for state in [GameState::MainMenu, GameState::Completed] {
            let mut machine = machine_in(state);
            assert!(machine.handle(Trigger::PauseToggled).is_none());
            assert_eq!(machine.state(), state);
        }
    }

    #[test]
    fn next_level_ready_while_playing_keeps_playing() {
        let mut machine = machine_in(GameState::Playing);
        assert!(machine.handle(Trigger::LevelReady).is_none());
        assert_eq!(machine.state(), GameState::Playing);
    }

    #[test]
    fn completion_is_left_only_by_restart() {
        let mut machine = machine_in(GameState::Playing);
        machine.handle(Trigger::AllLevelsCompleted);
        assert_eq!(machine.state(), GameState::Completed);

        for trigger in [Trigger::LevelReady, Trigger::PauseToggled, Trigger::ResumeRequested] {
            assert!(machine.handle(trigger).is_none());
            assert_eq!(machine.state(), GameState::Completed);
        }

        machine.handle(Trigger::RestartRequested);
        assert_eq!(machine.state(), GameState::MainMenu);
    }

    #[test]
    fn restart_is_ignored_mid_game() {
        let mut machine = machine_in(GameState::Playing);
        assert!(machine.handle(Trigger::RestartRequested).is_none());
    }
}
