use crate::error::FieldError;

pub const MAX_PARTICLES: usize = 100;

pub const PARTICLE_RADIUS: f32 = 5.0;
/// Halo circle radius relative to the core circle.
pub const HALO_SCALE: f32 = 2.0;

/// Reach of both the pointer tether and the agentic neighbor scan.
pub const INTERACTION_RADIUS: f32 = 100.0;
/// Fraction of the offset removed by one pull toward a pointer or an agent.
pub const PULL_FACTOR: f32 = 0.02;
/// Neighbors a moving agent may drag per frame.
pub const NEIGHBOR_LIMIT: usize = 5;

pub const AGENTIC_PROBABILITY: f64 = 0.1;
pub const STATIONARY_PROBABILITY: f64 = 0.2;
pub const SPEED_SHUFFLE_PROBABILITY: f64 = 0.005;

pub const INITIAL_SPEED_MIN: f32 = -1.0;
pub const INITIAL_SPEED_MAX: f32 = 1.0;
// Not symmetric: shuffled speeds lean toward +x/+y.
pub const SHUFFLE_SPEED_MIN: f32 = -1.0;
pub const SHUFFLE_SPEED_MAX: f32 = 3.0;

pub const CORE_ALPHA: f32 = 0.8;
pub const HALO_ALPHA: f32 = 0.1;

/// Size reported by a drawing surface that has not been laid out yet.
pub const FALLBACK_WIDTH: f32 = 300.0;
pub const FALLBACK_HEIGHT: f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    pub max_particles: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.max_particles == 0 {
            return Err(FieldError::EmptyField);
        }
        Ok(())
    }
}
