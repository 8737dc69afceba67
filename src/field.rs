// The particle field simulation. Owns the pool, the pointer state and the rng.
// Pointer moves, frame ticks and resizes all arrive through `handle`, so a single
// owner mutates the pool no matter which browser callback fired

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::pool::ParticlePool;
use crate::surface::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldEvent {
    PointerMove { x: f64, y: f64, at_ms: f64 },
    Frame { at_ms: f64 },
    Resize { width: f64, height: f64 },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub drawn: usize,
    pub culled: usize,
    pub ambient: bool,
    pub len: usize,
}

pub struct ParticleField<R: Rng> {
    config: FieldConfig,
    pool: ParticlePool,
    pointer: PointerState,
    rng: R,
    width: f64,
    height: f64,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(config: FieldConfig, rng: R, width: f64, height: f64) -> Self {
        let pool = ParticlePool::with_capacity(config.capacity);
        ParticleField {
            config,
            pool,
            pointer: PointerState::default(),
            rng,
            width,
            height,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // Replaces the pool with `seed_count` particles spread over the whole surface
    pub fn seed(&mut self) {
        self.pool.clear();
        for _ in 0..self.config.seed_count {
            self.inject_random();
        }
    }

    pub fn inject(&mut self, x: f64, y: f64) {
        let particle = Particle::spawn(&mut self.rng, x, y, &self.config);
        self.pool.push(particle);
    }

    pub fn handle<S: Surface>(&mut self, event: FieldEvent, surface: &S) -> Option<FrameReport> {
        match event {
            FieldEvent::PointerMove { x, y, at_ms } => {
                self.pointer_move(x, y, at_ms);
                None
            }
            FieldEvent::Frame { at_ms } => Some(self.frame(surface, at_ms)),
            FieldEvent::Resize { width, height } => {
                self.resize(width, height);
                None
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, at_ms: f64) {
        self.pointer.record(x, y, at_ms);
        for _ in 0..self.config.burst_count {
            self.inject(x, y);
        }
    }

    // Only the logical size changes, particles keep their positions
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn frame<S: Surface>(&mut self, surface: &S, at_ms: f64) -> FrameReport {
        surface.clear();
        self.pointer.refresh_idle(at_ms, self.config.idle_ms);

        let mut drawn = 0;
        let culled = self
            .pool
            .advance(self.config.decay, self.config.min_size, |p| {
                surface.draw_circle(p.pos, p.size, p.color, p.alpha);
                drawn += 1;
            });

        let ambient = self.rng.gen_bool(self.config.ambient_chance);
        if ambient {
            self.inject_random();
        }

        FrameReport {
            drawn,
            culled,
            ambient,
            len: self.pool.len(),
        }
    }

    fn inject_random(&mut self) {
        let x = self.rng.gen::<f64>() * self.width;
        let y = self.rng.gen::<f64>() * self.height;
        self.inject(x, y);
    }
}
