use cgmath::{InnerSpace, Vector2, vec2};
use eframe::egui::Color32;
use log::trace;
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::{
    AGENTIC_PROBABILITY, CORE_ALPHA, HALO_ALPHA, HALO_SCALE, INITIAL_SPEED_MAX, INITIAL_SPEED_MIN,
    INTERACTION_RADIUS, NEIGHBOR_LIMIT, PARTICLE_RADIUS, PULL_FACTOR, SHUFFLE_SPEED_MAX,
    SHUFFLE_SPEED_MIN, SPEED_SHUFFLE_PROBABILITY, STATIONARY_PROBABILITY,
};
use crate::field::{FrameContext, Pointer, SurfaceSize};

/// Color channels in `[0, 255)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn with_alpha(self, alpha: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.r as u8,
            self.g as u8,
            self.b as u8,
            (alpha * 255.0).round() as u8,
        )
    }
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}

#[derive(Clone, Debug)]
pub struct Particle {
    position: Vector2<f32>,
    velocity: Vector2<f32>,
    radius: f32,
    color: Rgb,
    core: Color32,
    halo: Color32,
    agentic: bool,
    stationary: bool,
}

impl Particle {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            radius: PARTICLE_RADIUS,
            color,
            core: color.with_alpha(CORE_ALPHA),
            halo: color.with_alpha(HALO_ALPHA),
            agentic: false,
            stationary: false,
        }
    }

    pub fn agentic(mut self, agentic: bool) -> Self {
        self.agentic = agentic;
        self
    }

    pub fn stationary(mut self, stationary: bool) -> Self {
        self.stationary = stationary;
        self
    }

    /// Random particle somewhere on `surface`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, surface: SurfaceSize) -> Self {
        let speed_span = INITIAL_SPEED_MAX - INITIAL_SPEED_MIN;

        // Sampling order is fixed so a seeded rng reproduces the same field.
        let position = vec2(unit(rng) * surface.width, unit(rng) * surface.height);
        let velocity = vec2(
            unit(rng) * speed_span + INITIAL_SPEED_MIN,
            unit(rng) * speed_span + INITIAL_SPEED_MIN,
        );
        let agentic = rng.gen_bool(AGENTIC_PROBABILITY);
        let stationary = rng.gen_bool(STATIONARY_PROBABILITY);
        let color = Rgb {
            r: unit(rng) * 255.0,
            g: unit(rng) * 255.0,
            b: unit(rng) * 255.0,
        };

        Self::new(position, velocity, color)
            .agentic(agentic)
            .stationary(stationary)
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn speed_x(&self) -> f32 {
        self.velocity.x
    }

    pub fn speed_y(&self) -> f32 {
        self.velocity.y
    }

    pub fn set_speed_x(&mut self, speed_x: f32) {
        self.velocity.x = speed_x;
    }

    pub fn set_speed_y(&mut self, speed_y: f32) {
        self.velocity.y = speed_y;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn core_style(&self) -> Color32 {
        self.core
    }

    pub fn halo_style(&self) -> Color32 {
        self.halo
    }

    pub fn is_agentic(&self) -> bool {
        self.agentic
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    /// Renders this particle and advances it one frame.
    ///
    /// `neighbors` must yield every other particle of the field in stored
    /// order; agentic particles mutate them in place.
    pub fn draw_and_advance<'a, C, R, I>(
        &mut self,
        canvas: &mut C,
        frame: &FrameContext,
        neighbors: I,
        rng: &mut R,
    ) where
        C: Canvas + ?Sized,
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a mut Particle>,
    {
        self.draw(canvas);
        self.bounce(frame.surface);

        if !self.stationary {
            self.position += self.velocity;
        }

        self.follow_pointer(canvas, frame.pointer);

        if self.agentic {
            self.drag_neighbors(canvas, neighbors, rng);
        }
    }

    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.set_fill_style(self.core);
        canvas.fill_circle(self.position, self.radius);

        canvas.set_fill_style(self.halo);
        canvas.fill_circle(self.position, self.radius * HALO_SCALE);
    }

    fn bounce(&mut self, surface: SurfaceSize) {
        // Only an outward-moving component flips, so a particle that is
        // still outside after the flip keeps heading back in.
        macro_rules! reflect {
            ($coord:expr, $vel:expr, $limit:expr) => {
                if ($coord > $limit && $vel > 0.0) || ($coord < 0.0 && $vel < 0.0) {
                    $vel = -$vel;
                }
            };
        }

        reflect!(self.position.x, self.velocity.x, surface.width);
        reflect!(self.position.y, self.velocity.y, surface.height);
    }

    fn follow_pointer<C: Canvas + ?Sized>(&mut self, canvas: &mut C, pointer: Pointer) {
        let offset = self.position - pointer.position;
        if offset.magnitude() < INTERACTION_RADIUS {
            canvas.set_stroke_style(self.core);
            canvas.stroke_line(self.position, pointer.position);

            if pointer.pressed {
                self.position -= offset * PULL_FACTOR;
            }
        }
    }

    fn drag_neighbors<'a, C, R, I>(&self, canvas: &mut C, neighbors: I, rng: &mut R)
    where
        C: Canvas + ?Sized,
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a mut Particle>,
    {
        let mut nearby = 0;

        for neighbor in neighbors {
            let sampled = neighbor.position();
            if (sampled - self.position).magnitude() >= INTERACTION_RADIUS {
                continue;
            }

            nearby += 1;
            if nearby > NEIGHBOR_LIMIT && !self.stationary {
                break;
            }

            self.pull(neighbor);

            canvas.set_stroke_style(self.core);
            canvas.stroke_line(sampled, self.position);

            self.pull(neighbor);

            if rng.gen_bool(SPEED_SHUFFLE_PROBABILITY) {
                neighbor.set_speed_x(rng.gen_range(SHUFFLE_SPEED_MIN..SHUFFLE_SPEED_MAX));
                neighbor.set_speed_y(rng.gen_range(SHUFFLE_SPEED_MIN..SHUFFLE_SPEED_MAX));
                trace!(
                    "agent at ({:.1}, {:.1}) shuffled neighbor speed to {:?}",
                    self.position.x,
                    self.position.y,
                    neighbor.velocity()
                );
            }
        }
    }

    fn pull(&self, neighbor: &mut Particle) {
        let offset = neighbor.position() - self.position;
        neighbor.set_x(neighbor.x() - offset.x * PULL_FACTOR);
        neighbor.set_y(neighbor.y() - offset.y * PULL_FACTOR);
    }
}
