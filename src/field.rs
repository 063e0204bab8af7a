use cgmath::{Vector2, vec2};
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::config::{FALLBACK_HEIGHT, FALLBACK_WIDTH, FieldConfig};
use crate::error::FieldError;
use crate::particle::Particle;

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub position: Vector2<f32>,
    pub pressed: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            position: vec2(0.0, 0.0),
            pressed: false,
        }
    }
}

/// What every particle sees during one frame. Taken once at the top of the
/// frame so events landing mid-frame only show up in the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub surface: SurfaceSize,
    pub pointer: Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

pub struct ParticleField<R = StdRng> {
    particles: Vec<Particle>,
    pointer: Pointer,
    surface: SurfaceSize,
    rng: R,
    running: bool,
    frame_count: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Spawns `config.max_particles` random particles over `surface` and
    /// starts the frame loop.
    pub fn initialize(
        config: FieldConfig,
        surface: SurfaceSize,
        mut rng: R,
    ) -> Result<Self, FieldError> {
        config.validate()?;

        let particles: Vec<Particle> = (0..config.max_particles)
            .map(|_| Particle::spawn(&mut rng, surface))
            .collect();

        let agentic = particles.iter().filter(|p| p.is_agentic()).count();
        let stationary = particles.iter().filter(|p| p.is_stationary()).count();
        info!(
            "particle field: {} particles on {}x{} ({} agentic, {} stationary)",
            particles.len(),
            surface.width,
            surface.height,
            agentic,
            stationary
        );

        Ok(Self::from_particles(surface, particles, rng))
    }

    /// Field around particles that were set up elsewhere, already running.
    pub fn from_particles(surface: SurfaceSize, particles: Vec<Particle>, rng: R) -> Self {
        Self {
            particles,
            pointer: Pointer::default(),
            surface,
            rng,
            running: true,
            frame_count: 0,
        }
    }

    /// Clears `canvas`, then draws and advances every particle in stored
    /// order. Returns [`FrameStatus::Stopped`] without touching anything
    /// once [`stop`](Self::stop) has been called.
    pub fn on_frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }

        let frame = FrameContext {
            surface: self.surface,
            pointer: self.pointer,
        };

        canvas.clear();

        for index in 0..self.particles.len() {
            // Everything but the particle at `index`, still in stored order.
            let (before, rest) = self.particles.split_at_mut(index);
            let Some((particle, after)) = rest.split_first_mut() else {
                break;
            };
            particle.draw_and_advance(
                canvas,
                &frame,
                before.iter_mut().chain(after.iter_mut()),
                &mut self.rng,
            );
        }

        self.frame_count += 1;
        FrameStatus::Continue
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("particle field stopped after {} frames", self.frame_count);
        }
        self.running = false;
    }
}

impl<R> ParticleField<R> {
    pub fn on_resize(&mut self, surface: SurfaceSize) {
        if surface != self.surface {
            debug!("surface resized to {}x{}", surface.width, surface.height);
        }
        self.surface = surface;
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.position = vec2(x, y);
    }

    pub fn on_pointer_down(&mut self) {
        self.pointer.pressed = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer.pressed = false;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
