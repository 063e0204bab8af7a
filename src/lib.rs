//! Animated particle background: a field of drifting, pointer-reactive
//! particles where a few "agentic" ones drag their neighbors around.
//!
//! The core is renderer-agnostic. A platform adapter supplies a [`Canvas`],
//! calls [`ParticleField::on_frame`] once per repaint and forwards pointer
//! and resize events to the field.

pub mod canvas;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;

pub use canvas::{Canvas, PainterCanvas};
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{FrameContext, FrameStatus, ParticleField, Pointer, SurfaceSize};
pub use particle::{Particle, Rgb};
