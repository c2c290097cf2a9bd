use rand::Rng;

use crate::geometry::{ContainerPoint, Rect, Size, ViewportPoint};
use crate::tuning::DodgeTuning;

/// Layout of the playground as measured from the page, all in the viewport frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub container: Rect,
    pub control: Rect,
    pub anchor: Option<Rect>,
}

impl Layout {
    pub fn is_measured(&self) -> bool {
        self.container.is_measured() && self.control.is_measured()
    }

    pub fn bounds(&self) -> Size {
        self.container.free_space_for(self.control.size())
    }

    pub fn control_center(&self) -> ContainerPoint {
        self.container.to_local(self.control.center())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DodgeOutcome {
    Clear,
    Escaped(ContainerPoint),
    Cornered(ContainerPoint),
}

impl DodgeOutcome {
    pub fn target(self) -> Option<ContainerPoint> {
        match self {
            DodgeOutcome::Clear => None,
            DodgeOutcome::Escaped(pos) | DodgeOutcome::Cornered(pos) => Some(pos),
        }
    }
}

pub fn danger_radius(tuning: &DodgeTuning, control_width: f64) -> f64 {
    (control_width * tuning.radius_factor).clamp(tuning.radius_min, tuning.radius_max)
}

pub fn within_contact(tuning: &DodgeTuning, layout: &Layout, contact: ViewportPoint) -> bool {
    let center = layout.control.center();
    (contact.x - center.x).hypot(contact.y - center.y) <= tuning.contact_radius
}

pub fn plan_dodge<R: Rng + ?Sized>(
    tuning: &DodgeTuning,
    layout: &Layout,
    current: ContainerPoint,
    pointer: ViewportPoint,
    rng: &mut R,
) -> DodgeOutcome {
    let radius = danger_radius(tuning, layout.control.width);
    plan_dodge_within(tuning, layout, current, pointer, radius, rng)
}

pub fn plan_dodge_within<R: Rng + ?Sized>(
    tuning: &DodgeTuning,
    layout: &Layout,
    current: ContainerPoint,
    pointer: ViewportPoint,
    radius: f64,
    rng: &mut R,
) -> DodgeOutcome {
    let pointer = layout.container.to_local(pointer);
    let center = layout.control_center();
    let away_x = center.x - pointer.x;
    let away_y = center.y - pointer.y;
    let distance = away_x.hypot(away_y);
    if distance > radius {
        return DodgeOutcome::Clear;
    }

    let len = distance.max(1.0);
    let proposed = ContainerPoint::new(
        current.x + away_x / len * tuning.scoot + (rng.random::<f64>() - 0.5) * tuning.jitter,
        current.y + away_y / len * tuning.scoot + (rng.random::<f64>() - 0.5) * tuning.jitter,
    );
    let bounds = layout.bounds();
    let proposed = proposed.clamp_within(bounds);
    if proposed.distance_to(current) < tuning.stuck_threshold {
        return DodgeOutcome::Cornered(random_spot(bounds, rng));
    }
    DodgeOutcome::Escaped(proposed)
}

pub fn random_spot<R: Rng + ?Sized>(bounds: Size, rng: &mut R) -> ContainerPoint {
    ContainerPoint::new(
        rng.random::<f64>() * bounds.width,
        rng.random::<f64>() * bounds.height,
    )
}

/// Resting spot beside the accept control, or the control's own spot when there is no anchor.
pub fn home_position(tuning: &DodgeTuning, layout: &Layout) -> ContainerPoint {
    let bounds = layout.bounds();
    let spot = match layout.anchor {
        Some(anchor) if anchor.is_measured() => {
            let anchor_center = anchor.center();
            ContainerPoint::new(
                anchor.right() + tuning.home_gap - layout.container.left,
                anchor_center.y - layout.control.height * 0.5 - layout.container.top,
            )
        }
        _ => layout
            .container
            .to_local(ViewportPoint::new(layout.control.left, layout.control.top)),
    };
    spot.clamp_within(bounds)
}
