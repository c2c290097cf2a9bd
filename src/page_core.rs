use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use js_sys::{Date, Math};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen_futures::spawn_local;
use valentine_core::{Action, BatchId, ContainerPoint, Effect, Particle, Phase, Session, Tuning};

pub(crate) type PageSubscriber = Rc<dyn Fn()>;

pub(crate) struct PageCore {
    session: RefCell<Session>,
    rng: RefCell<StdRng>,
    snapshot: RefCell<PageSnapshot>,
    subscribers: Rc<RefCell<Vec<PageSubscriber>>>,
    cleanups: RefCell<HashMap<BatchId, Timeout>>,
    this: Weak<PageCore>,
}

#[derive(Clone, PartialEq)]
pub(crate) struct PageSnapshot {
    pub(crate) phase: Phase,
    pub(crate) decline: Option<ContainerPoint>,
    pub(crate) hearts: Rc<Vec<Particle>>,
    pub(crate) confirmation: Option<&'static str>,
}

impl PageSnapshot {
    fn from_session(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            decline: session.decline_position(),
            hearts: Rc::new(session.particles().as_slice().to_vec()),
            confirmation: session.confirmation(),
        }
    }

    pub(crate) fn accepted(&self) -> bool {
        self.phase == Phase::Accepted
    }
}

impl PageCore {
    pub(crate) fn new(tuning: Tuning) -> Rc<Self> {
        let session = Session::new(tuning);
        let snapshot = PageSnapshot::from_session(&session);
        Rc::new_cyclic(|this| Self {
            session: RefCell::new(session),
            rng: RefCell::new(StdRng::seed_from_u64(entropy_seed())),
            snapshot: RefCell::new(snapshot),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            cleanups: RefCell::new(HashMap::new()),
            this: this.clone(),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: PageSubscriber) -> PageSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        PageSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> PageSnapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn is_accepted(&self) -> bool {
        self.session.borrow().is_accepted()
    }

    pub(crate) fn verbose(&self) -> bool {
        self.session.borrow().tuning().verbose
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub(crate) fn pending_cleanups(&self) -> usize {
        self.cleanups.borrow().len()
    }

    /// Runs one action through the session. Returns true when the triggering
    /// DOM event must not perform its default action.
    pub(crate) fn dispatch(&self, action: Action) -> bool {
        let effects = {
            let mut session = self.session.borrow_mut();
            let mut rng = self.rng.borrow_mut();
            session.apply(action, &mut *rng)
        };
        let mut suppress = false;
        for effect in &effects {
            match effect {
                Effect::SuppressDefault => suppress = true,
                Effect::Moved { to, cornered } => {
                    if self.verbose() {
                        gloo::console::log!(
                            "decline dodged",
                            format!("({:.0}, {:.0})", to.x, to.y),
                            if *cornered { "cornered" } else { "escape" }
                        );
                    }
                }
                Effect::ScheduleCleanup { batch, delay_ms } => {
                    self.schedule_cleanup(*batch, *delay_ms);
                }
                Effect::Celebrate { batch, hearts } => {
                    gloo::console::log!("accepted: hearts", *hearts, "batch", batch.0);
                }
                Effect::Cleared { batch, hearts } => {
                    gloo::console::log!("hearts cleared", *hearts, "batch", batch.0);
                }
            }
        }
        let next = PageSnapshot::from_session(&self.session.borrow());
        let changed = *self.snapshot.borrow() != next;
        if changed {
            *self.snapshot.borrow_mut() = next;
            self.notify_subscribers();
        }
        suppress
    }

    pub(crate) fn cancel_timers(&self) {
        let pending: Vec<Timeout> = self.cleanups.borrow_mut().drain().map(|(_, t)| t).collect();
        if !pending.is_empty() {
            gloo::console::log!("dropping pending heart cleanups", pending.len());
        }
        drop(pending);
    }

    fn schedule_cleanup(&self, batch: BatchId, delay_ms: u32) {
        let this = self.this.clone();
        let timeout = Timeout::new(delay_ms, move || {
            let Some(core) = this.upgrade() else {
                return;
            };
            let fired = core.cleanups.borrow_mut().remove(&batch);
            core.dispatch(Action::BatchExpired { batch });
            // Still inside the timer callback; release the handle once it returns.
            if let Some(fired) = fired {
                spawn_local(async move {
                    drop(fired);
                });
            }
        });
        self.cleanups.borrow_mut().insert(batch, timeout);
    }

    fn notify_subscribers(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct PageSubscription {
    subscriber: PageSubscriber,
    subscribers: Rc<RefCell<Vec<PageSubscriber>>>,
}

impl Drop for PageSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

fn entropy_seed() -> u64 {
    let high = (Math::random() * f64::from(u32::MAX)) as u64;
    let low = (Math::random() * f64::from(u32::MAX)) as u64;
    ((high << 32) | low) ^ Date::now() as u64
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::Cell;
    use valentine_core::{BurstTuning, Size};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn quick_burst() -> Tuning {
        Tuning {
            burst: BurstTuning {
                duration_min_ms: 10.0,
                duration_range_ms: 10.0,
                delay_max_ms: 0.0,
                cleanup_delay_ms: 40,
                ..BurstTuning::default()
            },
            ..Tuning::default()
        }
    }

    #[wasm_bindgen_test(async)]
    async fn batch_is_removed_after_cleanup_delay() {
        let core = PageCore::new(quick_burst());
        let notified = Rc::new(Cell::new(0u32));
        let counter = notified.clone();
        let _subscription = core.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        let viewport = Size::new(800.0, 600.0);
        core.dispatch(Action::Accept { viewport });
        assert_eq!(core.snapshot().hearts.len(), 70);
        assert_eq!(core.pending_cleanups(), 1);
        assert_eq!(notified.get(), 1);

        core.dispatch(Action::Accept { viewport });
        assert_eq!(core.snapshot().hearts.len(), 70);
        assert_eq!(notified.get(), 1);

        TimeoutFuture::new(120).await;
        assert!(core.snapshot().hearts.is_empty());
        assert_eq!(core.pending_cleanups(), 0);
        assert_eq!(notified.get(), 2);
        assert!(core.snapshot().accepted());
    }

    #[wasm_bindgen_test(async)]
    async fn cancelled_cleanup_never_fires() {
        let core = PageCore::new(quick_burst());
        core.dispatch(Action::Accept {
            viewport: Size::new(800.0, 600.0),
        });
        core.cancel_timers();
        TimeoutFuture::new(120).await;
        assert_eq!(core.snapshot().hearts.len(), 70);
    }
}
