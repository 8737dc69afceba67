// Bounded particle pool. Oldest particles sit at the front and are evicted first

use crate::particle::Particle;
use std::collections::VecDeque;

pub struct ParticlePool {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        ParticlePool {
            particles: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // Appends and returns how many old particles were evicted to stay within capacity
    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push_back(particle);
        let mut evicted = 0;
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
            evicted += 1;
        }
        evicted
    }

    // Steps every particle once, drops the ones that decayed and hands the survivors
    // to `visit` in pool order. Returns the number of particles dropped
    pub fn advance<F>(&mut self, decay: f64, min_size: f64, mut visit: F) -> usize
    where
        F: FnMut(&Particle),
    {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            let alive = p.step(decay, min_size);
            if alive {
                visit(p);
            }
            alive
        });
        before - self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn particle(tag: f64, size: f64) -> Particle {
        Particle::new([tag, 0.0], [0.0, 0.0], size, Color::from_u32(0xffffffff), 1.0)
    }

    fn tags(pool: &ParticlePool) -> Vec<f64> {
        pool.iter().map(|p| p.pos[0]).collect()
    }

    #[test]
    fn evicts_oldest_first_at_capacity() {
        let mut pool = ParticlePool::with_capacity(200);
        for i in 0..200 {
            assert_eq!(pool.push(particle(i as f64, 3.0)), 0);
        }
        assert_eq!(pool.push(particle(200.0, 3.0)), 1);

        assert_eq!(pool.len(), 200);
        let expected: Vec<f64> = (1..=200).map(|i| i as f64).collect();
        assert_eq!(tags(&pool), expected);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut pool = ParticlePool::with_capacity(5);
        for i in 0..50 {
            pool.push(particle(i as f64, 3.0));
            assert!(pool.len() <= 5);
        }
        assert_eq!(tags(&pool), vec![45.0, 46.0, 47.0, 48.0, 49.0]);
    }

    #[test]
    fn adjacent_decayed_particles_are_all_removed() {
        let mut pool = ParticlePool::with_capacity(10);
        pool.push(particle(0.0, 3.0));
        pool.push(particle(1.0, 0.32));
        pool.push(particle(2.0, 0.33));
        pool.push(particle(3.0, 3.0));
        pool.push(particle(4.0, 0.31));

        let mut visited = Vec::new();
        let removed = pool.advance(0.05, 0.3, |p| visited.push(p.pos[0]));

        assert_eq!(removed, 3);
        assert_eq!(tags(&pool), vec![0.0, 3.0]);
        assert_eq!(visited, vec![0.0, 3.0]);
    }
}
