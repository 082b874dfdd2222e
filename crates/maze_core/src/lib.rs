pub mod camera;
pub mod input;
pub mod time;

pub use camera::{CameraMode, CameraPose, LookAngles};
pub use input::{Action, InputMapper, IntentState, Key, KeyEvent};
pub use time::{ElapsedTimer, FrameClock};
