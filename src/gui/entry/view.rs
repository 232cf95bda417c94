use super::model::{Animation, Entry};
use crate::config::Config;
use crate::gui::canvas::{ArcGradient, Canvas, DrawArgs, DrawError, TextLabel};
use crate::gui::geometry::{EntryGeometry, Point};
use crate::item::{InventorySnapshot, WheelItem};

impl Animation {
    /// Starts the expand or retract ease on a hover edge. Level changes only.
    fn track_hover(&mut self, hovered: bool, spacing: f64, config: &Config) {
        if hovered == self.prev_hovered {
            return;
        }
        self.prev_hovered = hovered;

        let wheel = &config.wheel;
        let anim = &config.animation;
        if hovered {
            let thickness = wheel.outer_circle_radius - wheel.inner_circle_radius;
            let ratio = wheel.inner_circle_radius / wheel.outer_circle_radius;
            self.radius_inc
                .interpolate_to(anim.expand_scale * thickness, anim.expand_time);
            self.outer_angle_inc.interpolate_to(spacing * ratio, anim.expand_time);
            self.inner_angle_inc.interpolate_to(spacing, anim.expand_time);
        } else {
            self.radius_inc.interpolate_to(0.0, anim.retract_time);
            self.outer_angle_inc.interpolate_to(0.0, anim.retract_time);
            self.inner_angle_inc.interpolate_to(0.0, anim.retract_time);
        }
    }

    /// Once the activation bounce bottoms out, ease it back to rest.
    fn settle_bounce(&mut self, config: &Config) {
        if self.radius_bounce.target() != 0.0 && self.radius_bounce.is_settled() {
            self.radius_bounce.interpolate_to(0.0, config.animation.bounce_time);
        }
    }
}

impl Entry {
    /// Draws the entry's wedge and the thin state ring just outside it.
    ///
    /// The outer radius grows with the hover expansion and shrinks with the activation
    /// bounce; the angular bounds widen by twice the angle interpolators, once per side.
    pub fn draw_background(
        &self,
        geometry: &EntryGeometry,
        hovered: bool,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        let config = self.config();
        let wheel = &config.wheel;
        let active = self.is_active(inv);

        let (outer_radius, inner, outer) = {
            let mut anim = self.anim.lock();
            let radius =
                wheel.outer_circle_radius + anim.radius_inc.value() + anim.radius_bounce.value();
            let inner = geometry.inner.widen(anim.inner_angle_inc.value() * 2.0);
            let outer = geometry.outer.widen(anim.outer_angle_inc.value() * 2.0);
            anim.settle_bounce(config);
            anim.track_hover(hovered, geometry.spacing, config);
            (radius, inner, outer)
        };

        canvas.draw_arc_gradient(
            &ArcGradient {
                center: geometry.wheel_center,
                inner_radius: wheel.inner_circle_radius,
                outer_radius,
                inner,
                outer,
                colors: if hovered { wheel.hovered } else { wheel.unhovered },
                segments: geometry.segments,
            },
            args,
        )?;

        canvas.draw_arc_gradient(
            &ArcGradient {
                center: geometry.wheel_center,
                inner_radius: outer_radius,
                outer_radius: outer_radius + wheel.active_arc_width,
                inner: outer,
                outer,
                colors: if active {
                    wheel.active_arc
                } else {
                    wheel.inactive_arc
                },
                segments: geometry.segments,
            },
            args,
        )
    }

    /// Highlight (only while hovered) at the wheel centre, then the slot icon.
    pub fn draw_slot_and_highlight(
        &self,
        wheel_center: Point,
        entry_center: Point,
        hovered: bool,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        if hovered {
            self.draw_highlight(wheel_center, inv, canvas, args)?;
        }
        self.draw_slot(entry_center, hovered, inv, canvas, args)
    }

    fn draw_slot(
        &self,
        center: Point,
        hovered: bool,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        let slots = self.slots.read();
        match slots.current() {
            Some(item) => item.draw_slot(center, hovered, inv, canvas, args),
            None => Ok(()),
        }
    }

    fn draw_highlight(
        &self,
        center: Point,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        let slots = self.slots.read();
        let Some(item) = slots.current() else {
            return Ok(());
        };
        item.draw_highlight(center, inv, canvas, args)?;

        if slots.items.len() > 1 {
            let text = &self.config().highlight;
            canvas.draw_text(
                &TextLabel {
                    origin: center.offset(text.offset_x, text.offset_y),
                    text: format!("{} / {}", slots.selected + 1, slots.items.len()),
                    color: text.color,
                    size: text.size,
                },
                args,
            )?;
        }
        Ok(())
    }
}
