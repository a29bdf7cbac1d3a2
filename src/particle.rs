// Particle structs for the two populations: spring-bound foreground particles
// and drifting, twinkling background particles

use std::f64::consts::PI;

use rand::Rng;
use vecmath::Vector2;

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub origin: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
    // Reserved, never read by the physics step
    pub angle: f64,
}

impl Particle {
    pub const MIN_SIZE: f64 = 1.0;
    pub const MAX_SIZE: f64 = 2.5;

    pub fn new(pos_x: f64, pos_y: f64, size: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            origin: [pos_x, pos_y],
            vel: [0.0, 0.0],
            size,
            color,
            angle: 0.0,
        }
    }

    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, accent_chance: f64) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let size = rng.gen::<f64>() * (Self::MAX_SIZE - Self::MIN_SIZE) + Self::MIN_SIZE;
        let color = if rng.gen::<f64>() < accent_chance {
            Color::ACCENT_BLUE
        } else {
            Color::WHITE
        };
        let mut particle = Particle::new(pos_x, pos_y, size, color);
        particle.angle = rng.gen::<f64>() * PI * 2.0;
        particle
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }

    pub fn is_accent(&self) -> bool {
        self.color == Color::ACCENT_BLUE
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundParticle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub alpha: f64,
    pub phase: f64,
}

impl BackgroundParticle {
    pub const MIN_SIZE: f64 = 0.5;
    pub const MAX_SIZE: f64 = 1.5;
    pub const MAX_DRIFT: f64 = 0.1;
    pub const MIN_ALPHA: f64 = 0.1;
    pub const MAX_ALPHA: f64 = 0.4;

    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> BackgroundParticle {
        let pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
        let vel = [
            (rng.gen::<f64>() - 0.5) * 2.0 * Self::MAX_DRIFT,
            (rng.gen::<f64>() - 0.5) * 2.0 * Self::MAX_DRIFT,
        ];
        BackgroundParticle {
            pos,
            vel,
            size: rng.gen::<f64>() * (Self::MAX_SIZE - Self::MIN_SIZE) + Self::MIN_SIZE,
            alpha: rng.gen::<f64>() * (Self::MAX_ALPHA - Self::MIN_ALPHA) + Self::MIN_ALPHA,
            phase: rng.gen::<f64>() * PI * 2.0,
        }
    }

    // Moves by velocity plus a vertical push, wrapping around every edge
    pub fn drift(&mut self, push_y: f64, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1] + push_y;

        if self.pos[0] < 0.0 {
            self.pos[0] = width;
        } else if self.pos[0] > width {
            self.pos[0] = 0.0;
        }
        if self.pos[1] < 0.0 {
            self.pos[1] = height;
        } else if self.pos[1] > height {
            self.pos[1] = 0.0;
        }
    }

    pub fn twinkle(&self, time: f64) -> f64 {
        (time * 0.002 + self.phase).sin() * 0.5 + 0.5
    }

    pub fn opacity(&self, time: f64) -> f64 {
        self.alpha * (0.3 + 0.7 * self.twinkle(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawned_particles_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, 640.0, 480.0, 0.1);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
            assert!(p.size >= Particle::MIN_SIZE && p.size <= Particle::MAX_SIZE);
            assert_eq!(p.pos, p.origin);
            assert_eq!(p.vel, [0.0, 0.0]);

            let b = BackgroundParticle::spawn(&mut rng, 640.0, 480.0);
            assert!(b.pos[0] >= 0.0 && b.pos[0] < 640.0);
            assert!(b.pos[1] >= 0.0 && b.pos[1] < 480.0);
            assert!(b.size >= BackgroundParticle::MIN_SIZE && b.size <= BackgroundParticle::MAX_SIZE);
            assert!(b.alpha >= BackgroundParticle::MIN_ALPHA && b.alpha <= BackgroundParticle::MAX_ALPHA);
            assert!(b.vel[0].abs() <= BackgroundParticle::MAX_DRIFT);
            assert!(b.vel[1].abs() <= BackgroundParticle::MAX_DRIFT);
            assert!(b.phase >= 0.0 && b.phase < PI * 2.0);
        }
    }

    #[test]
    fn accent_share_is_roughly_ten_percent() {
        let mut rng = StdRng::seed_from_u64(11);
        let accents = (0..10_000)
            .map(|_| Particle::spawn(&mut rng, 100.0, 100.0, 0.1))
            .filter(Particle::is_accent)
            .count();
        assert!(accents > 800 && accents < 1200, "accents = {}", accents);
    }

    fn drifting(pos: Vector2<f64>, vel: Vector2<f64>) -> BackgroundParticle {
        BackgroundParticle {
            pos,
            vel,
            size: 1.0,
            alpha: 0.2,
            phase: 0.0,
        }
    }

    #[test]
    fn background_wraps_on_every_edge() {
        let mut right = drifting([99.95, 50.0], [0.1, 0.0]);
        right.drift(0.0, 100.0, 100.0);
        assert_eq!(right.pos[0], 0.0);

        let mut left = drifting([0.05, 50.0], [-0.1, 0.0]);
        left.drift(0.0, 100.0, 100.0);
        assert_eq!(left.pos[0], 100.0);

        let mut bottom = drifting([50.0, 99.95], [0.0, 0.1]);
        bottom.drift(0.0, 100.0, 100.0);
        assert_eq!(bottom.pos[1], 0.0);

        let mut top = drifting([50.0, 0.2], [0.0, 0.0]);
        top.drift(-0.5, 100.0, 100.0);
        assert_eq!(top.pos[1], 100.0);
    }

    #[test]
    fn twinkle_follows_time_and_phase() {
        let mut b = drifting([0.0, 0.0], [0.0, 0.0]);
        let peak = PI / 2.0 / 0.002;
        assert!((b.twinkle(0.0) - 0.5).abs() < 1e-12);
        assert!((b.twinkle(peak) - 1.0).abs() < 1e-12);
        assert!((b.opacity(peak) - b.alpha).abs() < 1e-12);

        // A quarter-turn phase moves the peak to time zero
        b.phase = PI / 2.0;
        assert!((b.twinkle(0.0) - 1.0).abs() < 1e-12);
        b.phase = 3.0 * PI / 2.0;
        assert!(b.twinkle(0.0).abs() < 1e-12);
        assert!((b.opacity(0.0) - b.alpha * 0.3).abs() < 1e-12);
    }

    #[test]
    fn twinkle_keeps_opacity_within_base_alpha() {
        let b = drifting([0.0, 0.0], [0.0, 0.0]);
        for step in 0..200 {
            let opacity = b.opacity(step as f64 * 37.0);
            assert!(opacity >= 0.2 * 0.3 - 1e-12 && opacity <= 0.2 + 1e-12);
        }
    }
}
