// The particle field: a fixed set of particles advanced once per frame and
// drawn as dots plus proximity links. Everything here is independent of the
// browser; the animator feeds it a context and a painter.

use crate::config::ParticleConfig;
use crate::particle::Particle;
use crate::renderer::Painter;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

// Pointer and viewport as last seen by the event handlers
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldContext {
    pub viewport: Viewport,
    pub pointer: Option<Vector2<f64>>,
}

impl FieldContext {
    pub fn new(viewport: Viewport) -> Self {
        FieldContext {
            viewport,
            pointer: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    Running,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub opacity: f64,
}

/// Opacity of the line joining two particles `distance` apart. Linear from
/// `max_opacity` at zero to 0 at `max_distance`, never negative.
pub fn link_opacity(distance: f64, max_distance: f64, max_opacity: f64) -> f64 {
    ((1.0 - distance / max_distance) * max_opacity).max(0.0)
}

pub struct ParticleField {
    particles: Vec<Particle>,
    state: FieldState,
    config: ParticleConfig,
}

impl ParticleField {
    /// Number of particles for a viewport: one per `area_per_particle`, capped.
    pub fn particle_count(viewport: Viewport, config: &ParticleConfig) -> usize {
        let by_area = (viewport.area() / config.area_per_particle).floor();
        if by_area <= 0.0 {
            return 0;
        }
        (by_area as usize).min(config.max_particles)
    }

    pub fn new<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: ParticleConfig) -> Self {
        let count = ParticleField::particle_count(viewport, &config);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(rng, viewport));
        }
        ParticleField::from_particles(particles, config)
    }

    pub fn from_particles(particles: Vec<Particle>, config: ParticleConfig) -> Self {
        ParticleField {
            particles,
            state: FieldState::Idle,
            config,
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn step(&mut self, ctx: &FieldContext) {
        self.state = FieldState::Running;
        for particle in &mut self.particles {
            particle.update(ctx, &self.config);
        }
    }

    // O(n²) over unordered pairs, fine for n <= max_particles
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.distance_to(b);
                if distance < self.config.link_distance {
                    links.push(Link {
                        from: a.pos,
                        to: b.pos,
                        opacity: link_opacity(
                            distance,
                            self.config.link_distance,
                            self.config.link_max_opacity,
                        ),
                    });
                }
            }
        }
        links
    }

    /// Runs one whole frame: clear, advance, draw dots, draw links.
    pub fn frame<P: Painter>(&mut self, ctx: &FieldContext, painter: &mut P) {
        painter.clear(ctx.viewport);
        self.step(ctx);

        let color = self.config.color();
        for particle in &self.particles {
            let fill = color.to_css_with_alpha(particle.opacity);
            painter.fill_circle(particle.pos, particle.size, &fill);
        }
        for link in self.links() {
            painter.stroke_line(
                link.from,
                link.to,
                self.config.link_width,
                &color.to_css_with_alpha(link.opacity),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingPainter {
        ops: Vec<String>,
    }

    impl Painter for RecordingPainter {
        fn clear(&mut self, viewport: Viewport) {
            self.ops.push(format!("clear {}x{}", viewport.width, viewport.height));
        }

        fn fill_circle(&mut self, _center: Vector2<f64>, _radius: f64, _style: &str) {
            self.ops.push("circle".to_owned());
        }

        fn stroke_line(&mut self, _from: Vector2<f64>, _to: Vector2<f64>, width: f64, style: &str) {
            self.ops.push(format!("line {} {}", width, style));
        }
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 1.0, 0.5)
    }

    #[test]
    fn count_follows_area_and_caps() {
        let config = ParticleConfig::default();
        let count = |w, h| ParticleField::particle_count(Viewport { width: w, height: h }, &config);
        assert_eq!(count(400.0, 300.0), 10);
        assert_eq!(count(375.0, 667.0), 20);
        assert_eq!(count(1920.0, 1080.0), 120);
        assert_eq!(count(100.0, 100.0), 0);
        assert_eq!(count(0.0, 0.0), 0);
    }

    #[test]
    fn link_opacity_is_linear_between_ends() {
        assert_eq!(link_opacity(150.0, 150.0, 0.15), 0.0);
        assert_eq!(link_opacity(0.0, 150.0, 0.15), 0.15);
        assert!((link_opacity(75.0, 150.0, 0.15) - 0.075).abs() < 1e-12);
        assert!((link_opacity(30.0, 150.0, 0.15) - 0.12).abs() < 1e-12);
        assert_eq!(link_opacity(200.0, 150.0, 0.15), 0.0);
    }

    #[test]
    fn links_only_join_pairs_under_threshold() {
        let field = ParticleField::from_particles(
            vec![still(0.0, 0.0), still(100.0, 0.0), still(250.0, 0.0), still(0.0, 150.0)],
            ParticleConfig::default(),
        );
        let links = field.links();
        // (0,1) at 100, (1,2) at 150 excluded, (0,3) at 150 excluded, (1,3) at ~180 excluded
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, [0.0, 0.0]);
        assert_eq!(links[0].to, [100.0, 0.0]);
        assert!((links[0].opacity - 0.05).abs() < 1e-12);
    }

    #[test]
    fn resize_does_not_change_particle_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new(
            &mut rng,
            Viewport { width: 600.0, height: 400.0 },
            ParticleConfig::default(),
        );
        assert_eq!(field.len(), 20);
        let mut ctx = FieldContext::new(Viewport { width: 600.0, height: 400.0 });
        field.step(&ctx);
        ctx.viewport = Viewport { width: 1920.0, height: 1080.0 };
        field.step(&ctx);
        assert_eq!(field.len(), 20);
    }

    #[test]
    fn first_frame_moves_field_to_running() {
        let mut field = ParticleField::from_particles(
            vec![still(10.0, 10.0), still(20.0, 10.0)],
            ParticleConfig::default(),
        );
        assert_eq!(field.state(), FieldState::Idle);

        let mut painter = RecordingPainter::default();
        field.frame(&FieldContext::new(Viewport { width: 100.0, height: 50.0 }), &mut painter);

        assert_eq!(field.state(), FieldState::Running);
        assert_eq!(
            painter.ops,
            vec![
                "clear 100x50".to_owned(),
                "circle".to_owned(),
                "circle".to_owned(),
                format!("line 0.5 rgba(0, 212, 255, {})", link_opacity(10.0, 150.0, 0.15)),
            ]
        );
    }
}
