use rand::Rng;

use crate::burst::{spawn_batch, BatchId, ParticleField};
use crate::dodge::{home_position, plan_dodge, within_contact, DodgeOutcome, Layout};
use crate::geometry::{ContainerPoint, Size, ViewportPoint};
use crate::tuning::Tuning;

pub const CONFIRMATION_TEXT: &str = "Best decision ever. I love you ❤️";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Undecided,
    Accepted,
}

#[derive(Clone, Debug)]
pub enum Action {
    PointerMoved {
        at: ViewportPoint,
        layout: Option<Layout>,
    },
    DeclineContact {
        at: ViewportPoint,
        layout: Option<Layout>,
    },
    DeclinePressed {
        viewport: Size,
        layout: Option<Layout>,
    },
    LayoutSettled {
        layout: Layout,
    },
    Accept {
        viewport: Size,
    },
    BatchExpired {
        batch: BatchId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SuppressDefault,
    Moved {
        to: ContainerPoint,
        cornered: bool,
    },
    ScheduleCleanup {
        batch: BatchId,
        delay_ms: u32,
    },
    Celebrate {
        batch: BatchId,
        hearts: usize,
    },
    Cleared {
        batch: BatchId,
        hearts: usize,
    },
}

#[derive(Clone, Debug)]
pub struct Session {
    tuning: Tuning,
    phase: Phase,
    pointer: Option<ViewportPoint>,
    decline: Option<ContainerPoint>,
    particles: ParticleField,
    next_batch: u64,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: Phase::Undecided,
            pointer: None,
            decline: None,
            particles: ParticleField::new(),
            next_batch: 1,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_accepted(&self) -> bool {
        self.phase == Phase::Accepted
    }

    pub fn pointer(&self) -> Option<ViewportPoint> {
        self.pointer
    }

    pub fn decline_position(&self) -> Option<ContainerPoint> {
        self.decline
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn confirmation(&self) -> Option<&'static str> {
        self.is_accepted().then_some(CONFIRMATION_TEXT)
    }

    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Vec<Effect> {
        match action {
            Action::PointerMoved { at, layout } => {
                self.pointer = Some(at);
                self.dodge(at, layout, rng).into_iter().collect()
            }
            Action::DeclineContact { at, layout } => {
                if self.is_accepted() {
                    return Vec::new();
                }
                let Some(layout) = layout.filter(Layout::is_measured) else {
                    return Vec::new();
                };
                if !within_contact(&self.tuning.dodge, &layout, at) {
                    return Vec::new();
                }
                self.pointer = Some(at);
                let mut effects = vec![Effect::SuppressDefault];
                effects.extend(self.dodge(at, Some(layout), rng));
                effects
            }
            Action::DeclinePressed { viewport, layout } => {
                if self.is_accepted() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::SuppressDefault];
                let at = *self.pointer.get_or_insert_with(|| viewport.viewport_center());
                effects.extend(self.dodge(at, layout, rng));
                effects
            }
            Action::LayoutSettled { layout } => {
                self.settle(layout);
                Vec::new()
            }
            Action::Accept { viewport } => self.accept(viewport, rng),
            Action::BatchExpired { batch } => {
                let hearts = self.particles.remove_batch(batch);
                if hearts == 0 {
                    return Vec::new();
                }
                vec![Effect::Cleared { batch, hearts }]
            }
        }
    }

    fn dodge<R: Rng + ?Sized>(
        &mut self,
        pointer: ViewportPoint,
        layout: Option<Layout>,
        rng: &mut R,
    ) -> Option<Effect> {
        if self.is_accepted() {
            return None;
        }
        let layout = layout.filter(Layout::is_measured)?;
        let current = self.decline?;
        let outcome = plan_dodge(&self.tuning.dodge, &layout, current, pointer, rng);
        let cornered = matches!(outcome, DodgeOutcome::Cornered(_));
        let to = outcome.target()?;
        self.decline = Some(to);
        Some(Effect::Moved { to, cornered })
    }

    fn settle(&mut self, layout: Layout) {
        if self.is_accepted() || !layout.is_measured() {
            return;
        }
        let next = match self.decline {
            Some(current) => current.clamp_within(layout.bounds()),
            None => home_position(&self.tuning.dodge, &layout),
        };
        self.decline = Some(next);
    }

    fn accept<R: Rng + ?Sized>(&mut self, viewport: Size, rng: &mut R) -> Vec<Effect> {
        if self.is_accepted() {
            return Vec::new();
        }
        self.phase = Phase::Accepted;
        let batch = BatchId(self.next_batch);
        self.next_batch += 1;
        let spawned = spawn_batch(&self.tuning.burst, batch, viewport, rng);
        let hearts = spawned.particles.len();
        self.particles.append(spawned);
        vec![
            Effect::Celebrate { batch, hearts },
            Effect::ScheduleCleanup {
                batch,
                delay_ms: self.tuning.burst.cleanup_delay_ms,
            },
        ]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
