// The particle field simulator: owns both populations, applies input events,
// advances the physics once per animation frame and renders onto a `Surface`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecmath::Vector2;

use crate::color::{Color, Rgba, ScrollGradient};
use crate::config::FieldConfig;
use crate::particle::{BackgroundParticle, Particle};
use crate::scroll::{ScrollSample, ScrollSampler};
use crate::surface::Surface;

/// Input signals from the host page. Applying one only writes fields; the
/// frame loop is what integrates them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldEvent {
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    Resized { width: f64, height: f64 },
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseState {
    pub pos: Vector2<f64>,
    pub active: bool,
}

/// Everything a frame reads from the outside world.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Animation frame timestamp in milliseconds.
    pub time: f64,
    pub scroll_offset: f64,
    pub viewport_height: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    rng: StdRng,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    background: Vec<BackgroundParticle>,
    mouse: MouseState,
    scroll: ScrollSampler,
    current_color: Color,
    time: f64,
}

/// Number of particles a `width` x `height` area holds at `density`.
pub fn population(width: f64, height: f64, density: f64) -> usize {
    let count = (width * height * density).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Linear falloff of the pointer's push, `None` outside its reach.
pub fn repulsion_factor(distance: f64, radius: f64) -> Option<f64> {
    if distance < radius {
        Some((radius - distance) / radius)
    } else {
        None
    }
}

/// Separates overlapping particles by moving each half the overlap along the
/// collision normal. Only even indices start a check, so two odd-indexed
/// particles are never tested against each other.
pub fn resolve_collisions(particles: &mut [Particle]) {
    let count = particles.len();
    for i in (0..count).step_by(2) {
        for j in i + 1..count {
            let (head, tail) = particles.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let delta = vecmath::vec2_sub(b.pos, a.pos);
            let reach = a.size + b.size;
            let dist_sq = vecmath::vec2_square_len(delta);
            if dist_sq >= reach * reach {
                continue;
            }
            let dist = dist_sq.sqrt();
            if dist < 0.01 {
                continue;
            }
            let normal = vecmath::vec2_scale(delta, 1.0 / dist);
            let push = vecmath::vec2_scale(normal, (reach - dist) / 2.0);
            a.pos = vecmath::vec2_sub(a.pos, push);
            b.pos = vecmath::vec2_add(b.pos, push);
        }
    }
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let current_color = ScrollGradient::SCROLL.sample(0.0);
        ParticleField {
            config,
            rng,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            background: Vec::new(),
            mouse: MouseState::default(),
            scroll: ScrollSampler::new(),
            current_color,
            time: 0.0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn background(&self) -> &[BackgroundParticle] {
        &self.background
    }

    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn entity_count(&self) -> usize {
        self.particles.len() + self.background.len()
    }

    /// Applies one input event. A resize returns the new entity count.
    pub fn apply(&mut self, event: FieldEvent) -> Option<usize> {
        match event {
            FieldEvent::PointerMoved { x, y } => {
                self.mouse.pos = [x, y];
                self.mouse.active = true;
                None
            }
            FieldEvent::PointerLeft => {
                self.mouse.active = false;
                None
            }
            FieldEvent::Resized { width, height } => Some(self.resize(width, height)),
        }
    }

    /// Throws away both populations and spawns new ones for the given size.
    pub fn resize(&mut self, width: f64, height: f64) -> usize {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let (width, height) = (self.width, self.height);
        let particle_count = population(width, height, self.config.particle_density);
        let background_count = population(width, height, self.config.background_density);

        let mut particles = Vec::with_capacity(particle_count);
        for _ in 0..particle_count {
            particles.push(Particle::spawn(
                &mut self.rng,
                width,
                height,
                self.config.accent_chance,
            ));
        }
        let mut background = Vec::with_capacity(background_count);
        for _ in 0..background_count {
            background.push(BackgroundParticle::spawn(&mut self.rng, width, height));
        }
        self.particles = particles;
        self.background = background;

        log::debug!(
            "particle field {}x{}: {} particles, {} background",
            width,
            height,
            particle_count,
            background_count
        );
        self.entity_count()
    }

    /// Advances the simulation by one frame.
    pub fn step(&mut self, input: FrameInput) -> ScrollSample {
        self.time = input.time;
        let scroll = self.scroll.sample(
            input.scroll_offset,
            input.viewport_height,
            self.config.max_progress(),
            self.config.scroll_force_scale,
        );
        self.current_color =
            ScrollGradient::SCROLL.sample_over(scroll.progress, self.config.max_progress());

        let push_y = scroll.force * self.config.background_scroll_share;
        for particle in &mut self.background {
            particle.drift(push_y, self.width, self.height);
        }

        self.apply_forces(scroll.force);
        resolve_collisions(&mut self.particles);

        let damping = self.config.damping;
        for particle in &mut self.particles {
            particle.vel = vecmath::vec2_scale(particle.vel, damping);
            particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
        }
        scroll
    }

    fn apply_forces(&mut self, scroll_force: f64) {
        let mouse = self.mouse;
        let radius = self.config.mouse_radius;
        let strength = self.config.repulsion * self.config.repulsion_boost;
        let spring = self.config.spring;

        for particle in &mut self.particles {
            if mouse.active {
                let away = vecmath::vec2_sub(particle.pos, mouse.pos);
                let distance = vecmath::vec2_len(away);
                if let Some(force) = repulsion_factor(distance, radius) {
                    let angle = away[1].atan2(away[0]);
                    particle.vel[0] += angle.cos() * force * strength;
                    particle.vel[1] += angle.sin() * force * strength;
                }
            }

            particle.vel[1] += scroll_force;

            let home = vecmath::vec2_sub(particle.origin, particle.pos);
            particle.vel = vecmath::vec2_add(particle.vel, vecmath::vec2_scale(home, spring));
        }
    }

    /// Alpha of the central glow, a slow pulse around 0.085.
    pub fn glow_alpha(time: f64) -> f64 {
        (time * 0.0008).sin() * 0.035 + 0.085
    }

    /// Draws the current state: glow, background particles, then foreground.
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        surface.clear();

        let color = self.current_color;
        surface.radial_glow(
            self.width / 2.0,
            self.height / 2.0,
            self.width.max(self.height) * 0.7,
            color.with_alpha(Self::glow_alpha(self.time)),
            color.with_alpha(0.0),
        );

        for particle in &self.background {
            surface.fill_circle(
                particle.pos[0],
                particle.pos[1],
                particle.size,
                Color::WHITE.with_alpha(particle.opacity(self.time)),
            );
        }

        for particle in &self.particles {
            let opacity = (0.3 + particle.speed() * 0.1).min(1.0);
            let fill = if self.rng.gen::<f64>() < self.config.sparkle_chance {
                color.with_alpha(opacity)
            } else if particle.is_accent() {
                Rgba::opaque(particle.color)
            } else {
                particle.color.with_alpha(opacity)
            };
            surface.fill_circle(particle.pos[0], particle.pos[1], particle.size, fill);
        }
    }

    pub fn frame<S: Surface>(&mut self, input: FrameInput, surface: &mut S) -> ScrollSample {
        let scroll = self.step(input);
        self.render(surface);
        scroll
    }
}
