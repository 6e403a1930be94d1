// src/lib.rs
//! Interactive Droste ("Escher") recursive zoom of a 24-bit RGB bitmap.
//!
//! - [`mapper`]: the spiral mapping from a source bitmap to a same-size result
//! - [`bitmap`]: owned RGB pixel buffer, bounds-checked accessor and BMP I/O
//! - [`orchestrator`]: parameter state, input handling and the per-tick render
//! - [`display`]: display driver protocol, X11 and headless drivers

pub mod bitmap;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod keys;
pub mod mapper;
pub mod orchestrator;

pub use bitmap::Bitmap;
pub use color::Rgb;
pub use error::EscherError;
pub use mapper::{map, map_into, TransformParams};
