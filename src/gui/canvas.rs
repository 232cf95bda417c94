use crate::gui::geometry::{AngleRange, Point};
use crate::gui::theme::{ColorPair, HexColor};
use cairo::Context;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
}

/// Per-frame draw context handed down to every draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawArgs {
    pub alpha: f64,
}

impl Default for DrawArgs {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

/// A ring section whose inner and outer edges may span different angles, filled with a
/// gradient running along the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner: AngleRange,
    pub outer: AngleRange,
    pub colors: ColorPair,
    pub segments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Centre of the rendered text.
    pub origin: Point,
    pub text: String,
    pub color: HexColor,
    pub size: f64,
}

/// Stateless drawing backend.
pub trait Canvas {
    fn draw_arc_gradient(&mut self, arc: &ArcGradient, args: DrawArgs) -> Result<(), DrawError>;
    fn draw_text(&mut self, label: &TextLabel, args: DrawArgs) -> Result<(), DrawError>;
}

pub struct CairoCanvas<'a> {
    cr: &'a Context,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_source(&self, (r, g, b, a): (f64, f64, f64, f64), args: DrawArgs) {
        self.cr.set_source_rgba(r, g, b, a * args.alpha);
    }
}

impl Canvas for CairoCanvas<'_> {
    fn draw_arc_gradient(&mut self, arc: &ArcGradient, args: DrawArgs) -> Result<(), DrawError> {
        let segments = arc.segments.max(1);
        let polar = |radius: f64, angle: f64| {
            arc.center.offset(radius * angle.cos(), radius * angle.sin())
        };
        let inner_at = |t: f64| polar(arc.inner_radius, arc.inner.min + arc.inner.span() * t);
        let outer_at = |t: f64| polar(arc.outer_radius, arc.outer.min + arc.outer.span() * t);

        for i in 0..segments {
            let (t0, t1) = (
                i as f64 / segments as f64,
                (i + 1) as f64 / segments as f64,
            );
            let corners = [inner_at(t0), outer_at(t0), outer_at(t1), inner_at(t1)];

            self.set_source(arc.colors.lerp((t0 + t1) / 2.0).into_components(), args);
            self.cr.move_to(corners[0].x, corners[0].y);
            for p in &corners[1..] {
                self.cr.line_to(p.x, p.y);
            }
            self.cr.close_path();
            self.cr.fill()?;
        }
        Ok(())
    }

    fn draw_text(&mut self, label: &TextLabel, args: DrawArgs) -> Result<(), DrawError> {
        self.set_source(label.color.into_components(), args);
        self.cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        self.cr.set_font_size(label.size);
        let ext = self.cr.text_extents(&label.text)?;
        self.cr.move_to(
            label.origin.x - ext.width() / 2.0,
            label.origin.y + ext.height() / 2.0,
        );
        self.cr.show_text(&label.text)?;
        Ok(())
    }
}
