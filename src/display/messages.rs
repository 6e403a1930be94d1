// src/display/messages.rs
//! Message types for communication between the orchestrator and a DisplayDriver.
//!
//! All communication happens via ownership transfer - no shared state. The
//! framebuffer travels to the driver inside `Present` and comes back in
//! `PresentComplete` (or inside `DisplayError::PresentationFailed`).

use crate::keys::{KeySymbol, Modifiers, MouseButton};
use std::fmt;

/// Bytes per framebuffer pixel (B, G, R, X).
pub const FRAMEBUFFER_BYTES_PER_PIXEL: usize = 4;

/// A framebuffer plus its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub framebuffer: Box<[u8]>,
    pub width_px: u32,
    pub height_px: u32,
}

impl RenderSnapshot {
    /// Black framebuffer of the given size.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        let len = width_px as usize * height_px as usize * FRAMEBUFFER_BYTES_PER_PIXEL;
        Self {
            framebuffer: vec![0u8; len].into_boxed_slice(),
            width_px,
            height_px,
        }
    }
}

/// Requests sent to the DisplayDriver.
#[derive(Debug, Clone)]
pub enum DriverRequest {
    /// Create (or resize) and show the window.
    Init {
        width_px: u32,
        height_px: u32,
        title: String,
    },

    /// Request pending native events. Never blocks.
    PollEvents,

    /// Display the framebuffer. The driver hands it back in `PresentComplete`.
    Present(RenderSnapshot),

    /// Set the window title.
    SetTitle(String),
}

/// Responses sent back from the DisplayDriver.
#[derive(Debug)]
pub enum DriverResponse {
    /// Window is up with the given size.
    InitComplete { width_px: u32, height_px: u32 },

    /// Native events that occurred since the last poll.
    Events(Vec<DisplayEvent>),

    /// Frame presentation complete, framebuffer ownership returned.
    PresentComplete(RenderSnapshot),

    /// Window title was set.
    TitleSet,
}

/// Platform-agnostic display events.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// Key press event.
    Key {
        symbol: KeySymbol,
        modifiers: Modifiers,
        text: Option<String>,
    },

    /// Mouse button release, in window pixel coordinates.
    MouseButtonRelease {
        button: MouseButton,
        x: i32,
        y: i32,
        modifiers: Modifiers,
    },

    /// Window contents were damaged and need to be presented again.
    Expose,

    /// User requested window close.
    CloseRequested,
}

/// Errors from a DisplayDriver.
///
/// A failed `Present` hands the snapshot back so the caller keeps its buffer.
pub enum DisplayError {
    PresentationFailed(RenderSnapshot, String),
    Generic(anyhow::Error),
}

impl fmt::Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::PresentationFailed(snapshot, reason) => write!(
                f,
                "PresentationFailed({}x{}, {:?})",
                snapshot.width_px, snapshot.height_px, reason
            ),
            DisplayError::Generic(e) => write!(f, "Generic({:?})", e),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::PresentationFailed(_, reason) => {
                write!(f, "presentation failed: {}", reason)
            }
            DisplayError::Generic(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<anyhow::Error> for DisplayError {
    fn from(e: anyhow::Error) -> Self {
        DisplayError::Generic(e)
    }
}
