pub mod burst;
pub mod dodge;
pub mod geometry;
pub mod session;
pub mod tuning;

pub use burst::{spawn_batch, BatchId, Particle, ParticleBatch, ParticleField, ParticleId, HEART_GLYPHS};
pub use dodge::{danger_radius, home_position, plan_dodge, DodgeOutcome, Layout};
pub use geometry::{ContainerPoint, Rect, Size, ViewportPoint};
pub use session::{Action, Effect, Phase, Session, CONFIRMATION_TEXT};
pub use tuning::{BurstTuning, DodgeTuning, Tuning, TuningError, TUNING_KEYS};
