// src/display/driver.rs
//! DisplayDriver trait - minimal interface for platform-specific display primitives.
//!
//! ## Lifecycle
//! 1. `new()` - Connect to the display system, no window yet
//! 2. `handle_request(Init)` - Create the window at the requested size
//! 3. Request/response loop - `PollEvents`, `Present`, `SetTitle`
//! 4. `Drop` - Cleanup (no explicit shutdown message)

use crate::display::messages::{DisplayError, DriverRequest, DriverResponse};
use anyhow::Result;

/// Minimal platform-specific display driver interface.
pub trait DisplayDriver {
    /// Pure initialization only - no window creation.
    fn new() -> Result<Self>
    where
        Self: Sized;

    /// Handle a request, returning a response.
    ///
    /// ## Request/Response Pairs
    /// - `Init` → `InitComplete`
    /// - `PollEvents` → `Events` (non-blocking, possibly empty)
    /// - `Present(snapshot)` → `PresentComplete(snapshot)`
    /// - `SetTitle(s)` → `TitleSet`
    ///
    /// Returns `DisplayError` instead of `anyhow::Result` so a failed `Present`
    /// can give the framebuffer back.
    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError>;
}
