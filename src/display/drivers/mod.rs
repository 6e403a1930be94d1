// src/display/drivers/mod.rs
//! Display driver implementations.

pub mod headless;
#[cfg(feature = "x11")]
pub mod x11;

pub use headless::HeadlessDisplayDriver;
#[cfg(feature = "x11")]
pub use self::x11::X11DisplayDriver;
