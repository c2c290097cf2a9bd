use std::fmt;

use rand::Rng;

use crate::geometry::{Size, ViewportPoint};
use crate::tuning::BurstTuning;

pub const HEART_GLYPHS: &[&str] = &["💖", "💗", "💘", "💝", "💕", "❤️", "🩷"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId {
    pub batch: BatchId,
    pub index: u32,
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heart-{}-{}", self.batch.0, self.index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub origin: ViewportPoint,
    pub size: f64,
    pub drift: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub glyph: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBatch {
    pub id: BatchId,
    pub particles: Vec<Particle>,
}

pub fn spawn_batch<R: Rng + ?Sized>(
    tuning: &BurstTuning,
    id: BatchId,
    viewport: Size,
    rng: &mut R,
) -> ParticleBatch {
    let particles = (0..tuning.count)
        .map(|index| Particle {
            id: ParticleId {
                batch: id,
                index: index as u32,
            },
            origin: ViewportPoint::new(
                rng.random::<f64>() * viewport.width,
                viewport.height - tuning.bottom_inset - rng.random::<f64>() * tuning.rise,
            ),
            size: tuning.size_min + rng.random::<f64>() * tuning.size_range,
            drift: (rng.random::<f64>() - 0.5) * tuning.drift_span,
            duration_ms: tuning.duration_min_ms + rng.random::<f64>() * tuning.duration_range_ms,
            delay_ms: rng.random::<f64>() * tuning.delay_max_ms,
            glyph: HEART_GLYPHS[rng.random_range(0..HEART_GLYPHS.len())],
        })
        .collect();
    ParticleBatch { id, particles }
}

/// Live hearts on screen. Batches enter and leave whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
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

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn append(&mut self, batch: ParticleBatch) {
        self.particles.extend(batch.particles);
    }

    pub fn remove_batch(&mut self, id: BatchId) -> usize {
        let before = self.particles.len();
        self.particles.retain(|particle| particle.id.batch != id);
        before - self.particles.len()
    }
}
