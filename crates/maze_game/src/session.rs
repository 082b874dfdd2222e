//! The per-frame driver.
//!
//! A [`MazeSession`] owns every piece of simulation state and runs one frame
//! per call to [`MazeSession::frame`], in a fixed order:
//!
//! 1. advance the frame clock
//! 2. drain the event queue (keys, pointer motion, menu commands, load results)
//! 3. act on edge intents (pause, camera, confirm)
//! 4. when playing with a maze installed: step the controller, then check the exit
//! 5. drop unconsumed input edges
//! 6. hand a [`FrameView`] to the presenter
//!
//! Nothing outside the session mutates its state. Hosts and loaders only post
//! events, which wait in the queue until the next frame drains them.

use crate::config::GameConfig;
use crate::controller::{CharacterController, ControllerInput, PlayerKinematics};
use crate::events::{self, EventReceiver, EventSender, GameEvent, LoadTicket, MenuCommand};
use crate::leaderboard::Leaderboard;
use crate::level::MazeGeometry;
use crate::loader::{AssetLoader, LoadRequest};
use crate::presentation::{level_text, timer_text, FrameView, HudText, Overlay, Presenter};
use crate::progression::{Advance, LevelProgression};
use crate::state::{GameState, GameStateMachine, Trigger};
use maze_core::camera::{CameraMode, LookAngles};
use maze_core::input::InputMapper;
use maze_core::time::{ElapsedTimer, FrameClock};

pub struct MazeSession {
    config: GameConfig,
    machine: GameStateMachine,
    input: InputMapper,
    controller: CharacterController,
    progression: LevelProgression,
    timer: ElapsedTimer,
    clock: FrameClock,
    camera_mode: CameraMode,
    look: LookAngles,
    geometry: Option<MazeGeometry>,
    pending_load: Option<LoadTicket>,
    next_ticket: u64,
    events_tx: EventSender,
    events_rx: EventReceiver,
    loader: Box<dyn AssetLoader>,
    leaderboard: Box<dyn Leaderboard>,
    presenter: Box<dyn Presenter>,
    hud: HudText,
}

impl MazeSession {
    pub fn new(
        config: GameConfig,
        loader: Box<dyn AssetLoader>,
        leaderboard: Box<dyn Leaderboard>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let (events_tx, events_rx) = events::channel();
        let progression = LevelProgression::new(config.levels.clone(), config.exit_radius);
        let hud = HudText {
            timer: timer_text(0.0),
            level: progression
                .current_level()
                .map(|level| level_text(0, &level.name))
                .unwrap_or_default(),
        };

        Self {
            machine: GameStateMachine::new(),
            input: InputMapper::new(),
            controller: CharacterController::new(config.physics),
            progression,
            timer: ElapsedTimer::new(),
            clock: FrameClock::new(config.max_frame_dt),
            camera_mode: config.initial_camera,
            look: LookAngles::default(),
            geometry: None,
            pending_load: None,
            next_ticket: 1,
            events_tx,
            events_rx,
            loader,
            leaderboard,
            presenter,
            hud,
            config,
        }
    }

    /// A handle hosts can keep to post events from anywhere.
    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    /// Queues `event` for the next frame.
    pub fn post(&self, event: GameEvent) {
        // The receiver lives in `self`, so this can't fail.
        let _ = self.events_tx.send(event);
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn kinematics(&self) -> &PlayerKinematics {
        &self.controller.kinematics
    }

    pub fn level_index(&self) -> usize {
        self.progression.current_index()
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        self.timer.elapsed(now)
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    pub fn look(&self) -> LookAngles {
        self.look
    }

    /// A level load is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Mid-game with no maze and nothing loading: the last load failed.
    pub fn is_stalled(&self) -> bool {
        matches!(self.state(), GameState::Playing | GameState::Paused)
            && self.geometry.is_none()
            && self.pending_load.is_none()
    }

    pub fn hud(&self) -> &HudText {
        &self.hud
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_input(&mut self) {
        self.input.release_all();
    }

    /// Runs one frame. `now` is the host's monotonic timestamp in seconds.
    pub fn frame(&mut self, now: f64) {
        let dt = self.clock.advance(now);

        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event, now);
        }

        self.handle_edges(now);

        if self.machine.simulation_enabled() {
            self.simulate(dt as f32, now);
        }

        self.input.end_frame();
        self.present();
    }

    fn handle_event(&mut self, event: GameEvent, now: f64) {
        match event {
            GameEvent::Key(key_event) => self.input.handle(key_event),
            GameEvent::Look { dx, dy } => {
                if self.machine.simulation_enabled() {
                    self.look.turn(dx, dy, self.config.look_sensitivity);
                }
            }
            GameEvent::Command(command) => self.handle_command(command, now),
            GameEvent::LevelLoaded { ticket, geometry } => {
                if self.accept_ticket(ticket) {
                    self.install_level(geometry, now);
                }
            }
            GameEvent::LevelLoadFailed { ticket, message } => {
                if self.accept_ticket(ticket) {
                    log::error!(
                        "Failed to load level {}: {}",
                        self.progression.current_index() + 1,
                        message
                    );
                }
            }
        }
    }

    /// Only the most recent request is live; anything else is stale.
    fn accept_ticket(&mut self, ticket: LoadTicket) -> bool {
        if self.pending_load == Some(ticket) {
            self.pending_load = None;
            true
        } else {
            log::debug!("Dropping stale load result {:?}", ticket);
            false
        }
    }

    fn handle_command(&mut self, command: MenuCommand, now: f64) {
        match command {
            MenuCommand::Start => {
                if self.pending_load.is_some() {
                    log::debug!("Start ignored, level already loading");
                } else if self.state() == GameState::MainMenu {
                    self.request_current_level();
                } else if self.is_stalled() {
                    log::info!("Retrying level {}", self.progression.current_index() + 1);
                    self.request_current_level();
                } else {
                    log::debug!("Start ignored while {}", self.state());
                }
            }
            MenuCommand::Resume => {
                if self.machine.handle(Trigger::ResumeRequested).is_some() {
                    self.timer.resume(now);
                }
            }
            MenuCommand::Restart => {
                if self.machine.handle(Trigger::RestartRequested).is_some() {
                    self.progression.restart();
                    self.timer.reset();
                    self.geometry = None;
                    self.controller.reset();
                    self.hud.timer = timer_text(0.0);
                    self.request_current_level();
                }
            }
        }
    }

    fn handle_edges(&mut self, now: f64) {
        let intent = self.input.intent_mut();
        let pause = intent.take_pause();
        let camera = intent.take_camera_toggle();
        let confirm = intent.take_confirm();

        if pause {
            match self.machine.handle(Trigger::PauseToggled).map(|t| t.to) {
                Some(GameState::Paused) => self.timer.pause(now),
                Some(GameState::Playing) => self.timer.resume(now),
                _ => {}
            }
        }

        if camera {
            self.camera_mode = self.camera_mode.next();
            log::info!("Camera: {}", self.camera_mode);
        }

        if confirm {
            let command = match self.state() {
                GameState::MainMenu => Some(MenuCommand::Start),
                GameState::Paused => Some(MenuCommand::Resume),
                GameState::Completed => Some(MenuCommand::Restart),
                GameState::Playing if self.is_stalled() => Some(MenuCommand::Start),
                GameState::Playing => None,
            };
            if let Some(command) = command {
                self.handle_command(command, now);
            }
        }
    }

    fn simulate(&mut self, dt: f32, now: f64) {
        // Between levels there is nothing to collide with or reach.
        let Some(geometry) = &self.geometry else {
            return;
        };

        let input = ControllerInput::from_intent(self.input.intent_mut()).facing(self.look.yaw);
        self.controller.step(input, dt, &geometry.walls);
        let reached = self
            .progression
            .exit_reached(self.controller.body_position(), geometry);

        if self.timer.is_running() {
            self.hud.timer = timer_text(self.timer.elapsed(now));
        }
        if reached {
            self.complete_level(now);
        }
    }

    fn complete_level(&mut self, now: f64) {
        let seconds = self.timer.elapsed(now);
        self.timer.reset();
        self.hud.timer = timer_text(seconds);

        let index = self.progression.current_index();
        let name = self
            .progression
            .current_level()
            .map(|level| level.name.clone())
            .unwrap_or_default();
        log::info!("Level {} completed in {:.2} seconds", index + 1, seconds);

        self.leaderboard.add_score(&name, seconds);
        let listing = self.leaderboard.listing(&self.progression.level_names());
        self.presenter.show_leaderboard(&listing);

        match self.progression.advance() {
            Advance::Next { index, level } => {
                self.geometry = None;
                self.controller.reset();
                self.request_load(index, level.asset);
            }
            Advance::Finished => {
                self.machine.handle(Trigger::AllLevelsCompleted);
                log::info!("Game completed!");
            }
        }
    }

    fn request_current_level(&mut self) {
        let index = self.progression.current_index();
        match self.progression.current_level() {
            Some(level) => {
                let asset = level.asset.clone();
                self.request_load(index, asset);
            }
            None => log::warn!("No level at index {index} to load"),
        }
    }

    fn request_load(&mut self, level_index: usize, asset_ref: String) {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_load = Some(ticket);
        self.loader.request(
            LoadRequest {
                ticket,
                level_index,
                asset_ref,
            },
            self.events_tx.clone(),
        );
    }

    fn install_level(&mut self, geometry: MazeGeometry, now: f64) {
        let index = self.progression.current_index();
        log::info!(
            "Level {} ready: '{}' with {} walls",
            index + 1,
            geometry.maze_id,
            geometry.walls.len()
        );
        if geometry.exit.is_none() {
            log::warn!("Maze '{}' has no exit; it can't be completed", geometry.maze_id);
        }

        self.geometry = Some(geometry);
        self.controller.reset();
        self.look = LookAngles::default();
        self.timer.start(now);
        if self.state() == GameState::Paused {
            // Loaded behind the pause menu; the clock starts on resume.
            self.timer.pause(now);
        }
        self.hud.timer = timer_text(0.0);
        if let Some(level) = self.progression.current_level() {
            self.hud.level = level_text(index, &level.name);
        }
        if self.state() == GameState::MainMenu {
            self.begin_play();
        }
    }

    fn begin_play(&mut self) {
        self.machine.handle(Trigger::LevelReady);
    }

    fn present(&mut self) {
        let eye = self.controller.kinematics.position;
        let state = self.state();
        let view = FrameView {
            state,
            camera_mode: self.camera_mode,
            camera: self.camera_mode.pose(
                eye,
                self.controller.body_position(),
                self.config.third_person_offset,
                self.look,
            ),
            player_eye: eye,
            hud: self.hud.clone(),
            overlay: Overlay::for_state(state),
            loading: self.pending_load.is_some(),
            retry_available: self.is_stalled(),
        };
        self.presenter.present(&view);
    }
}
