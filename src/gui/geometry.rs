use crate::config::WheelStyle;
use std::f64::consts::PI;

pub const START_OFFSET: f64 = -PI / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Angular interval in radians, `min <= max` measured clockwise from the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Grows the range by `by` on both ends. Negative values shrink it.
    pub fn widen(self, by: f64) -> Self {
        Self::new(self.min - by, self.max + by)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Per-frame geometry of one entry, supplied by whoever lays out the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryGeometry {
    pub wheel_center: Point,
    pub item_center: Point,
    /// Gap between neighbouring entries on the inner ring, in radians.
    pub spacing: f64,
    pub inner: AngleRange,
    pub outer: AngleRange,
    pub segments: u32,
}

impl EntryGeometry {
    /// Equal wedge `index` of `count`, starting at 12 o'clock and going clockwise.
    ///
    /// The inner edge is pulled in by `spacing` per side, the outer edge by the same
    /// arc length (hence the radius ratio), so the gap between wedges stays parallel.
    pub fn wedge(
        index: usize,
        count: usize,
        wheel_center: Point,
        spacing: f64,
        style: &WheelStyle,
    ) -> Self {
        let count = count.max(1);
        let step = 2.0 * PI / count as f64;
        let start = START_OFFSET + index as f64 * step;
        let full = AngleRange::new(start, start + step);
        let ratio = style.inner_circle_radius / style.outer_circle_radius;

        let inner = full.widen(-spacing);
        let outer = full.widen(-spacing * ratio);

        let mid_radius = (style.inner_circle_radius + style.outer_circle_radius) / 2.0;
        let angle = full.mid();
        let item_center = wheel_center.offset(mid_radius * angle.cos(), mid_radius * angle.sin());

        Self {
            wheel_center,
            item_center,
            spacing,
            inner,
            outer,
            segments: (64 / u32::try_from(count).unwrap_or(u32::MAX)).max(8),
        }
    }
}
