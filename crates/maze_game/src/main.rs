//! Maze Runner -- window host.
//!
//! winit drives the event loop via `ApplicationHandler`. Key presses and raw
//! mouse motion are posted to the session's event queue as they arrive; the session itself only runs on
//! `RedrawRequested`, which `about_to_wait` requests continuously. The GPU
//! surface is cleared to a colour per game mode, and HUD text goes to the
//! window title. The pointer is captured only while playing.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use maze_core::input::{Key, KeyEvent};
use maze_game::config::{GameConfig, DEFAULT_CONFIG_PATH};
use maze_game::leaderboard::{JsonFileStore, LeaderboardListing, PersistentLeaderboard};
use maze_game::loader::JsonMazeLoader;
use maze_game::presentation::{FrameView, Overlay, Presenter, COMPLETION_MESSAGE};
use maze_game::{GameEvent, GameState, MazeSession};
use maze_render::{ClearColor, GpuContext};

fn clear_color_for(state: GameState) -> ClearColor {
    match state {
        GameState::MainMenu => ClearColor::rgb(0.05, 0.05, 0.12),
        GameState::Playing => ClearColor::rgb(0.53, 0.81, 0.92),
        GameState::Paused => ClearColor::rgb(0.2, 0.2, 0.25),
        GameState::Completed => ClearColor::rgb(0.1, 0.35, 0.1),
    }
}

struct WindowPresenter {
    window: Arc<Window>,
    gpu: Rc<RefCell<GpuContext>>,
    base_title: String,
    last_title: String,
    cursor_captured: bool,
}

impl WindowPresenter {
    fn title_for(&self, frame: &FrameView) -> String {
        let status = match frame.overlay {
            Overlay::None if frame.retry_available => {
                "Level failed to load - Enter to retry".to_string()
            }
            Overlay::MainMenu {
                resume_available: false,
            } if frame.loading => "Loading...".to_string(),
            Overlay::MainMenu {
                resume_available: false,
            } => "Press Enter to start".to_string(),
            Overlay::MainMenu {
                resume_available: true,
            } => "Paused - Enter to resume".to_string(),
            Overlay::Completion => format!("{COMPLETION_MESSAGE} Enter to play again"),
            Overlay::None => format!("{} | {}", frame.hud.level, frame.hud.timer),
        };
        format!("{} | {} | {}", self.base_title, status, frame.camera_mode)
    }
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &FrameView) {
        let title = self.title_for(frame);
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
        let capture = frame.state == GameState::Playing;
        if capture != self.cursor_captured {
            maze_platform::window::capture_cursor(&self.window, capture);
            self.cursor_captured = capture;
        }
        self.gpu.borrow().present_clear(clear_color_for(frame.state));
    }

    fn show_leaderboard(&mut self, listing: &LeaderboardListing) {
        for line in listing.to_string().lines() {
            log::info!("{line}");
        }
    }
}

struct Runner {
    window: Arc<Window>,
    gpu: Rc<RefCell<GpuContext>>,
    session: MazeSession,
}

struct App {
    config: GameConfig,
    started: Instant,
    runner: Option<Runner>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
            runner: None,
        }
    }

    fn build_runner(&self, event_loop: &ActiveEventLoop) -> Result<Runner, String> {
        let window = maze_platform::window::create_window(event_loop, &self.config.window)
            .map_err(|e| format!("Failed to create window: {e}"))?;
        let gpu = Rc::new(RefCell::new(GpuContext::new(window.clone())?));

        let presenter = WindowPresenter {
            window: window.clone(),
            gpu: gpu.clone(),
            base_title: self.config.window.title.clone(),
            last_title: String::new(),
            cursor_captured: false,
        };
        let leaderboard = PersistentLeaderboard::open(
            JsonFileStore::new(&self.config.leaderboard_path),
            self.config.max_scores_per_level,
        );
        let session = MazeSession::new(
            self.config.clone(),
            Box::new(JsonMazeLoader::new(&self.config.assets_dir)),
            Box::new(leaderboard),
            Box::new(presenter),
        );

        Ok(Runner {
            window,
            gpu,
            session,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runner.is_some() {
            return;
        }
        match self.build_runner(event_loop) {
            Ok(runner) => self.runner = Some(runner),
            Err(err) => {
                log::error!("{err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(runner) = &self.runner {
            runner.window.request_redraw();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(runner) = self.runner.as_ref() else {
            return;
        };
        // Device events keep arriving while another window has focus.
        if !runner.window.has_focus() {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            runner.session.post(GameEvent::Look {
                dx: dx as f32,
                dy: dy as f32,
            });
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    runner.gpu.borrow_mut().resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => runner.session.release_input(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        let key_event = match event.state {
                            ElementState::Pressed => KeyEvent::down(key),
                            ElementState::Released => KeyEvent::up(key),
                        };
                        runner.session.post(GameEvent::Key(key_event));
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = self.started.elapsed().as_secs_f64();
                runner.session.frame(now);
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyV => Some(Key::V),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Maze Runner starting...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match GameConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    log::info!(
        "{} levels configured, assets in {}",
        config.levels.len(),
        config.assets_dir.display()
    );

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
