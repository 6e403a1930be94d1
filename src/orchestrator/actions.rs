// src/orchestrator/actions.rs
//
// Discrete user actions and the default bindings from display events.

use crate::display::messages::DisplayEvent;
use crate::keys::KeySymbol;

/// What the user asked for, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    /// Stop the viewer.
    Quit,
    /// Show the unmodified source in the result pane.
    Reset,
    /// Add `delta` to alpha.
    AdjustAlpha(f64),
    /// Add `delta` to beta.
    AdjustBeta(f64),
    /// Re-center on a window point; ignored outside the source pane.
    PickCenter { x: i32, y: i32 },
}

/// Step sizes used when translating key presses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub alpha: f64,
    pub beta: f64,
}

/// Default bindings: Escape quits, Space resets, Left/Right change alpha,
/// Up/Down change beta, releasing any mouse button picks a center.
/// `Expose` is not a user action and maps to `None`.
pub fn translate_event(event: &DisplayEvent, steps: Steps) -> Option<UserAction> {
    match event {
        DisplayEvent::CloseRequested => Some(UserAction::Quit),
        DisplayEvent::Key { symbol, .. } => match symbol {
            KeySymbol::Escape => Some(UserAction::Quit),
            KeySymbol::Char(' ') => Some(UserAction::Reset),
            KeySymbol::Left => Some(UserAction::AdjustAlpha(-steps.alpha)),
            KeySymbol::Right => Some(UserAction::AdjustAlpha(steps.alpha)),
            KeySymbol::Up => Some(UserAction::AdjustBeta(steps.beta)),
            KeySymbol::Down => Some(UserAction::AdjustBeta(-steps.beta)),
            _ => None,
        },
        DisplayEvent::MouseButtonRelease { x, y, .. } => {
            Some(UserAction::PickCenter { x: *x, y: *y })
        }
        DisplayEvent::Expose => None,
    }
}
