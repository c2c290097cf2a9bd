use rand::rngs::StdRng;
use rand::SeedableRng;
use valentine_core::{
    Action, ContainerPoint, Effect, Layout, Phase, Rect, Session, Size, ViewportPoint,
    CONFIRMATION_TEXT,
};

const VIEWPORT: Size = Size {
    width: 1024.0,
    height: 768.0,
};

fn layout() -> Layout {
    Layout {
        container: Rect::new(272.0, 260.0, 480.0, 250.0),
        control: Rect::new(520.0, 363.0, 110.0, 44.0),
        anchor: Some(Rect::new(410.0, 363.0, 96.0, 44.0)),
    }
}

fn ready_session(rng: &mut StdRng) -> Session {
    let mut session = Session::default();
    session.apply(Action::LayoutSettled { layout: layout() }, rng);
    session
}

#[test]
fn accept_spawns_one_batch_and_cleans_it_up() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut session = ready_session(&mut rng);
    assert_eq!(session.phase(), Phase::Undecided);
    assert!(session.particles().is_empty());
    assert_eq!(session.confirmation(), None);

    let effects = session.apply(Action::Accept { viewport: VIEWPORT }, &mut rng);
    let batch = match effects.as_slice() {
        [Effect::Celebrate { batch, hearts: 70 }, Effect::ScheduleCleanup {
            batch: scheduled,
            delay_ms: 3200,
        }] if batch == scheduled => *batch,
        other => panic!("unexpected effects {other:?}"),
    };
    assert!(session.is_accepted());
    assert_eq!(session.particles().len(), 70);
    assert_eq!(session.confirmation(), Some("Best decision ever. I love you ❤️"));
    assert_eq!(session.confirmation(), Some(CONFIRMATION_TEXT));

    let effects = session.apply(Action::BatchExpired { batch }, &mut rng);
    assert_eq!(effects, vec![Effect::Cleared { batch, hearts: 70 }]);
    assert!(session.particles().is_empty());
    assert!(session.is_accepted());
}

#[test]
fn second_accept_is_a_no_op() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut session = ready_session(&mut rng);
    session.apply(Action::Accept { viewport: VIEWPORT }, &mut rng);
    let before = session.particles().clone();
    let position = session.decline_position();

    let effects = session.apply(Action::Accept { viewport: VIEWPORT }, &mut rng);
    assert!(effects.is_empty());
    assert_eq!(session.particles(), &before);
    assert_eq!(session.decline_position(), position);
}

#[test]
fn accepted_session_freezes_decline_control() {
    let mut rng = StdRng::seed_from_u64(16);
    let mut session = ready_session(&mut rng);
    let placed = session.decline_position();
    session.apply(Action::Accept { viewport: VIEWPORT }, &mut rng);

    let center = layout().control.center();
    let moved = session.apply(
        Action::PointerMoved {
            at: center,
            layout: Some(layout()),
        },
        &mut rng,
    );
    let contact = session.apply(
        Action::DeclineContact {
            at: center,
            layout: Some(layout()),
        },
        &mut rng,
    );
    let mut smaller = layout();
    smaller.container.width = 200.0;
    session.apply(Action::LayoutSettled { layout: smaller }, &mut rng);

    assert!(moved.is_empty());
    assert!(contact.is_empty());
    assert_eq!(session.decline_position(), placed);
}

#[test]
fn contact_on_control_suppresses_press_and_relocates() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut session = ready_session(&mut rng);
    let placed = session.decline_position().expect("placed beside accept");
    assert_eq!(placed, ContainerPoint::new(246.0, 103.0));

    let touch = ViewportPoint::new(560.0, 380.0);
    let effects = session.apply(
        Action::DeclineContact {
            at: touch,
            layout: Some(layout()),
        },
        &mut rng,
    );
    assert_eq!(effects.first(), Some(&Effect::SuppressDefault));
    assert!(matches!(effects.get(1), Some(Effect::Moved { .. })));
    assert_ne!(session.decline_position(), Some(placed));
    assert_eq!(session.pointer(), Some(touch));
}

#[test]
fn distant_contact_is_left_to_the_page() {
    let mut rng = StdRng::seed_from_u64(18);
    let mut session = ready_session(&mut rng);
    let placed = session.decline_position();
    let effects = session.apply(
        Action::DeclineContact {
            at: ViewportPoint::new(10.0, 10.0),
            layout: Some(layout()),
        },
        &mut rng,
    );
    assert!(effects.is_empty());
    assert_eq!(session.decline_position(), placed);
}

#[test]
fn press_is_always_suppressed() {
    let mut rng = StdRng::seed_from_u64(19);
    let mut session = ready_session(&mut rng);
    let center = layout().control.center();
    session.apply(
        Action::PointerMoved {
            at: ViewportPoint::new(center.x, center.y - 300.0),
            layout: Some(layout()),
        },
        &mut rng,
    );
    let effects = session.apply(
        Action::DeclinePressed {
            viewport: VIEWPORT,
            layout: Some(layout()),
        },
        &mut rng,
    );
    assert_eq!(effects, vec![Effect::SuppressDefault]);
}
