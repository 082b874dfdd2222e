//! Recording collaborators for driving a `MazeSession` headlessly.

#![allow(dead_code)]

use glam::Vec3;
use maze_core::input::{Key, KeyEvent};
use maze_game::collision::WallBox;
use maze_game::config::GameConfig;
use maze_game::events::{EventSender, GameEvent};
use maze_game::leaderboard::{Leaderboard, LeaderboardListing, ScoreTable};
use maze_game::level::MazeGeometry;
use maze_game::loader::{AssetLoader, LoadRequest};
use maze_game::presentation::{FrameView, Presenter};
use maze_game::progression::LevelDef;
use maze_game::{MazeSession, MenuCommand};
use std::cell::RefCell;
use std::rc::Rc;

pub const FRAME: f64 = 1.0 / 60.0;

/// Holds every request until the test completes it with a maze of its choosing.
#[derive(Clone, Default)]
pub struct ManualLoader {
    pub requests: Rc<RefCell<Vec<(LoadRequest, EventSender)>>>,
}

impl AssetLoader for ManualLoader {
    fn request(&mut self, request: LoadRequest, reply: EventSender) {
        self.requests.borrow_mut().push((request, reply));
    }
}

impl ManualLoader {
    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn asset(&self, n: usize) -> String {
        self.requests.borrow()[n].0.asset_ref.clone()
    }

    /// Completes the most recent request.
    pub fn complete_latest(&self, geometry: MazeGeometry) {
        let requests = self.requests.borrow();
        let (request, reply) = requests.last().expect("a load was requested");
        reply
            .send(GameEvent::LevelLoaded {
                ticket: request.ticket,
                geometry,
            })
            .expect("session alive");
    }

    /// Fails the most recent request.
    pub fn fail_latest(&self, message: &str) {
        let requests = self.requests.borrow();
        let (request, reply) = requests.last().expect("a load was requested");
        reply
            .send(GameEvent::LevelLoadFailed {
                ticket: request.ticket,
                message: message.to_string(),
            })
            .expect("session alive");
    }
}

/// Counts calls and keeps scores in memory.
#[derive(Clone, Default)]
pub struct RecordingLeaderboard {
    pub added: Rc<RefCell<Vec<(String, f64)>>>,
    table: Rc<RefCell<ScoreTable>>,
}

impl Leaderboard for RecordingLeaderboard {
    fn add_score(&mut self, level_name: &str, seconds: f64) {
        self.added.borrow_mut().push((level_name.to_string(), seconds));
        self.table.borrow_mut().insert(level_name, seconds, 5);
    }

    fn scores(&self, level_name: &str) -> Vec<f64> {
        self.table.borrow().get(level_name).to_vec()
    }

    fn clear(&mut self) {
        self.table.borrow_mut().clear();
    }
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub frames: Rc<RefCell<Vec<FrameView>>>,
    pub listings: Rc<RefCell<Vec<LeaderboardListing>>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &FrameView) {
        self.frames.borrow_mut().push(frame.clone());
    }

    fn show_leaderboard(&mut self, listing: &LeaderboardListing) {
        self.listings.borrow_mut().push(listing.clone());
    }
}

impl RecordingPresenter {
    pub fn last(&self) -> FrameView {
        self.frames.borrow().last().cloned().expect("a frame was presented")
    }
}

pub struct Harness {
    pub session: MazeSession,
    pub loader: ManualLoader,
    pub leaderboard: RecordingLeaderboard,
    pub presenter: RecordingPresenter,
    pub now: f64,
}

impl Harness {
    pub fn new(config: GameConfig) -> Self {
        let loader = ManualLoader::default();
        let leaderboard = RecordingLeaderboard::default();
        let presenter = RecordingPresenter::default();
        let session = MazeSession::new(
            config,
            Box::new(loader.clone()),
            Box::new(leaderboard.clone()),
            Box::new(presenter.clone()),
        );
        Self {
            session,
            loader,
            leaderboard,
            presenter,
            now: 0.0,
        }
    }

    pub fn with_levels(names: &[&str]) -> Self {
        let levels = names
            .iter()
            .map(|name| LevelDef::new(*name, format!("{}.json", name.to_lowercase())))
            .collect();
        Self::new(GameConfig {
            levels,
            ..GameConfig::default()
        })
    }

    pub fn frame(&mut self) {
        self.session.frame(self.now);
        self.now += FRAME;
    }

    pub fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    pub fn press(&mut self, key: Key) {
        self.session.post(GameEvent::Key(KeyEvent::down(key)));
    }

    pub fn release(&mut self, key: Key) {
        self.session.post(GameEvent::Key(KeyEvent::up(key)));
    }

    /// Start, deliver `geometry` for the first level, and run the frame that installs it.
    pub fn start_with(&mut self, geometry: MazeGeometry) {
        self.session.post(GameEvent::Command(MenuCommand::Start));
        self.frame();
        self.loader.complete_latest(geometry);
        self.frame();
    }
}

pub fn open_maze() -> MazeGeometry {
    MazeGeometry {
        maze_id: "open".to_string(),
        walls: vec![],
        exit: None,
    }
}

/// Exit `distance` units straight ahead (-Z) of the spawn body centre.
pub fn maze_with_exit_ahead(distance: f32) -> MazeGeometry {
    MazeGeometry {
        maze_id: "exit_ahead".to_string(),
        walls: vec![WallBox::new(Vec3::new(10.0, 0.0, -10.0), Vec3::new(11.0, 3.0, 10.0))],
        exit: Some(Vec3::new(0.0, 0.9, -distance)),
    }
}
