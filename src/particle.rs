// Simple particle struct to keep track of individual position, velocity, size and opacity

use crate::config::ParticleConfig;
use crate::field::{FieldContext, Viewport};
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    const MIN_SIZE: f64 = 0.5;
    const SIZE_RANGE: f64 = 1.5;
    const MAX_SPEED: f64 = 0.2;
    const MIN_OPACITY: f64 = 0.1;
    const OPACITY_RANGE: f64 = 0.5;

    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        size: f64,
        opacity: f64,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            opacity,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Particle {
        let pos_x = rng.gen::<f64>() * viewport.width;
        let pos_y = rng.gen::<f64>() * viewport.height;
        let size = rng.gen::<f64>() * Particle::SIZE_RANGE + Particle::MIN_SIZE;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * Particle::MAX_SPEED;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * Particle::MAX_SPEED;
        let opacity = rng.gen::<f64>() * Particle::OPACITY_RANGE + Particle::MIN_OPACITY;
        Particle::new(pos_x, pos_y, vel_x, vel_y, size, opacity)
    }

    // One frame of motion: drift, bounce off the viewport edges, drift toward
    // a nearby pointer. Position always ends inside the viewport.
    pub fn update(&mut self, ctx: &FieldContext, config: &ParticleConfig) {
        let Viewport { width, height } = ctx.viewport;
        self.pos = vecmath::vec2_add(self.pos, self.vel);

        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }

        if let Some(pointer) = ctx.pointer {
            let to_pointer = vecmath::vec2_sub(pointer, self.pos);
            if vecmath::vec2_len(to_pointer) < config.pointer_radius {
                let nudge = vecmath::vec2_scale(to_pointer, config.pointer_pull);
                self.pos = vecmath::vec2_add(self.pos, nudge);
            }
        }

        self.pos[0] = self.pos[0].max(0.0).min(width);
        self.pos[1] = self.pos[1].max(0.0).min(height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}
