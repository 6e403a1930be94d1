// src/display/mod.rs
//! Message-based display system.
//!
//! - DisplayDriver: Platform-specific primitives (X11, headless)
//! - Messages: Request/Response protocol for communication
//! - Canvas: side-by-side source/result composition into a framebuffer

pub mod canvas;
pub mod driver;
pub mod drivers;
pub mod messages;

pub use canvas::SideBySide;
pub use driver::DisplayDriver;
pub use messages::{DisplayError, DisplayEvent, DriverRequest, DriverResponse, RenderSnapshot};
