use serde::Deserialize;
use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Maze Runner".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, winit::error::OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    log::info!(
        "Window created: '{}' {}x{}",
        config.title,
        config.width,
        config.height
    );
    Ok(Arc::new(window))
}

/// Lock and hide the pointer for mouse look, or hand it back to the desktop.
/// Platforms without pointer lock fall back to confining it to the window.
pub fn capture_cursor(window: &Window, captured: bool) {
    if captured {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(err) = grabbed {
            log::warn!("Cursor grab unavailable: {err}");
        }
    } else if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        log::warn!("Cursor release failed: {err}");
    }
    window.set_cursor_visible(!captured);
}
