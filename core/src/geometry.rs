#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned box in the viewport frame, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ContainerPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: ContainerPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn clamp_within(self, bounds: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, bounds.width),
            y: self.y.clamp(0.0, bounds.height),
        }
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn viewport_center(self) -> ViewportPoint {
        ViewportPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> ViewportPoint {
        ViewportPoint::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn to_local(&self, point: ViewportPoint) -> ContainerPoint {
        ContainerPoint::new(point.x - self.left, point.y - self.top)
    }

    pub fn to_viewport(&self, point: ContainerPoint) -> ViewportPoint {
        ViewportPoint::new(point.x + self.left, point.y + self.top)
    }

    /// Room left for a child of `child` size once its top-left is pinned inside.
    /// Collapses to zero when the child does not fit.
    pub fn free_space_for(&self, child: Size) -> Size {
        Size::new(
            (self.width - child.width).max(0.0),
            (self.height - child.height).max(0.0),
        )
    }
}
