use web_sys::{DomRect, Element, MouseEvent, TouchEvent};
use yew::NodeRef;

use valentine_core::{Layout, Rect, Size, ViewportPoint};

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn rect_of(element: &impl HasClientRect) -> Rect {
    let rect = element.client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn measured(node: &NodeRef) -> Option<Rect> {
    let element = node.cast::<Element>()?;
    let rect = rect_of(&element);
    rect.is_measured().then_some(rect)
}

/// Measures the playground, the decline control and the accept control.
/// `None` until both the playground and the decline control have a box.
pub(crate) fn measure_layout(container: &NodeRef, control: &NodeRef, anchor: &NodeRef) -> Option<Layout> {
    Some(Layout {
        container: measured(container)?,
        control: measured(control)?,
        anchor: measured(anchor),
    })
}

pub(crate) fn pointer_point(event: &MouseEvent) -> ViewportPoint {
    ViewportPoint::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

pub(crate) fn first_touch_point(event: &TouchEvent) -> Option<ViewportPoint> {
    let touch = event.touches().get(0)?;
    Some(ViewportPoint::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

pub(crate) fn viewport_size() -> Option<Size> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}
