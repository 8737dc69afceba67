// Simple particle struct to keep track of individual position, velocity, size and color.
// Size shrinks every frame, alpha stays fixed for the particle's lifetime

use crate::color::Color;
use crate::config::FieldConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
    pub alpha: f64,
    initial_size: f64,
    age: u32,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, color: Color, alpha: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            color,
            alpha,
            initial_size: size,
            age: 0,
        }
    }

    // Fresh particle at (x, y) with velocity, size, color and alpha sampled from the config ranges
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64, config: &FieldConfig) -> Particle {
        let speed = config.max_speed;
        let vel = if speed > 0.0 {
            [rng.gen_range(-speed, speed), rng.gen_range(-speed, speed)]
        } else {
            [0.0, 0.0]
        };
        let size = rng.gen_range(config.size_min, config.size_max);
        let alpha = rng.gen_range(config.alpha_min, config.alpha_max);
        let color = config
            .palette()
            .choose(rng)
            .copied()
            .unwrap_or_else(|| Color::from_u32(0xffffffff));

        Particle::new([x, y], vel, size, color, alpha)
    }

    // Moves one step and shrinks. Returns false once the particle is too small to keep.
    // Size is recomputed from the creation size so rounding does not pile up over frames
    pub fn step(&mut self, decay: f64, min_size: f64) -> bool {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.age += 1;
        self.size = Self::size_at(self.initial_size, self.age, decay);
        self.size > min_size
    }

    // Number of steps from creation until `step` returns false, i.e.
    // ceil((size - min_size) / decay) evaluated with the same arithmetic `step` uses
    pub fn frames_to_live(&self, decay: f64, min_size: f64) -> u32 {
        let size = self.initial_size;
        let mut frames = ((size - min_size) / decay).ceil().max(1.0) as u32;
        while frames > 1 && Self::size_at(size, frames - 1, decay) <= min_size {
            frames -= 1;
        }
        while Self::size_at(size, frames, decay) > min_size {
            frames += 1;
        }
        frames
    }

    fn size_at(initial_size: f64, age: u32, decay: f64) -> f64 {
        initial_size - age as f64 * decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(size: f64) -> Particle {
        Particle::new([10.0, 10.0], [1.0, -0.5], size, Color::from_u32(0xffffffff), 0.5)
    }

    #[test]
    fn spawned_particles_stay_in_configured_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, 5.0, 7.0, &config);
            assert_eq!(p.pos, [5.0, 7.0]);
            assert!(p.vel[0] >= -1.0 && p.vel[0] <= 1.0);
            assert!(p.vel[1] >= -1.0 && p.vel[1] <= 1.0);
            assert!(p.size >= 1.0 && p.size < 6.0);
            assert!(p.alpha >= 0.2 && p.alpha < 1.0);
            assert!(config.palette().contains(&p.color));
        }
    }

    #[test]
    fn step_moves_and_shrinks() {
        let mut p = sample(2.0);
        assert!(p.step(0.05, 0.3));
        assert_eq!(p.pos, [11.0, 9.5]);
        assert!((p.size - 1.95).abs() < 1e-9);
        assert_eq!(p.alpha, 0.5);
    }

    #[test]
    fn decays_after_expected_number_of_frames() {
        let sizes = (100..600).map(|i| i as f64 / 100.0).chain(vec![0.34, 5.999]);
        for size in sizes {
            let mut p = sample(size);
            let expected = p.frames_to_live(0.05, 0.3);
            let mut frames = 1;
            while p.step(0.05, 0.3) {
                frames += 1;
            }
            assert_eq!(frames, expected, "size {}", size);

            let closed_form = ((size - 0.3) / 0.05).ceil() as i64;
            assert!((expected as i64 - closed_form).abs() <= 1, "size {}", size);
        }
    }

    #[test]
    fn lifetime_is_fixed_at_creation() {
        let mut p = sample(2.5);
        let expected = p.frames_to_live(0.05, 0.3);
        assert!(p.step(0.05, 0.3));
        assert!(p.step(0.05, 0.3));
        assert_eq!(p.frames_to_live(0.05, 0.3), expected);
        assert!((p.size - 2.4).abs() < 1e-9);
    }
}
