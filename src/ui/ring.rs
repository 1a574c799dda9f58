//! Ratatui rendering of a spinner ring on a braille canvas.
//!
//! Each tick becomes a short line segment along its outward direction,
//! coloured by the tick colour dimmed to its current opacity.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, Widget,
    },
};

use crate::core::Rgb;
use crate::runtime::{Scheduler, VisualContainer};
use crate::widget::{Spinner, TickElement};

/// A spinner snapshot, created fresh each frame.
pub struct RingView<'a> {
    ticks: &'a [TickElement],
    now: Duration,
    center: (f64, f64),
    /// Distance from the centre to the outer tip of a tick.
    extent: f64,
    visible: bool,
    block: Option<Block<'a>>,
}

impl<'a> RingView<'a> {
    pub fn new<S: Scheduler, C: VisualContainer>(spinner: &'a Spinner<S, C>) -> Self {
        let config = spinner.config();
        let (ox, oy) = config.offset;
        let extent = config.radius()
            + config.tick_width.max(config.tick_height) / 2.0
            + ox.abs().max(oy.abs());
        Self {
            ticks: spinner.tick_elements(),
            now: spinner.scheduler().now(),
            center: config.offset,
            extent,
            visible: spinner.is_running(),
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for RingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block.clone() {
            block.render(area, buf);
        }
        if !self.visible || inner.width == 0 || inner.height == 0 {
            return;
        }

        let (x_half, y_half) = round_bounds(self.extent + 1.0, inner.width, inner.height);
        let segments: Vec<Segment> = self
            .ticks
            .iter()
            .map(|tick| tick_segment(tick, self.center, self.now))
            .collect();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_half, x_half])
            .y_bounds([-y_half, y_half])
            .paint(|ctx| {
                for segment in &segments {
                    ctx.draw(segment);
                }
            })
            .render(inner, buf);
    }
}

/// Half-extents that keep a circle round on cells about twice as tall as
/// they are wide.
fn round_bounds(extent: f64, width: u16, height: u16) -> (f64, f64) {
    let aspect = width as f64 / (height as f64 * 2.0);
    if aspect >= 1.0 {
        (extent * aspect, extent)
    } else {
        (extent, extent / aspect)
    }
}

/// Segment along the tick's long side.  Canvas y grows upward, ring y grows
/// downward, hence the flips.
fn tick_segment(tick: &TickElement, center: (f64, f64), now: Duration) -> Segment {
    let (cx, cy) = tick.placement.offset;
    let (dx, dy) = (cx - center.0, cy - center.1);
    let len = dx.hypot(dy);
    let (ux, uy) = if len > f64::EPSILON {
        (dx / len, dy / len)
    } else {
        tick.placement.rotation.sin_cos()
    };
    let half = tick.surface.height / 2.0;
    let Rgb(r, g, b) = tick.surface.color.scaled(tick.opacity.value_at(now));

    Segment::new(
        cx - ux * half,
        -(cy - uy * half),
        cx + ux * half,
        -(cy + uy * half),
        Color::Rgb(r, g, b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SpinnerConfig;
    use crate::runtime::{ManualClock, SceneNode};
    use crate::widget::Variant;

    fn painted_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|c| c.symbol() != " ").count()
    }

    fn spinner(variant: Variant) -> Spinner<ManualClock> {
        Spinner::new(variant, SpinnerConfig::default(), ManualClock::new(), SceneNode::new()).unwrap()
    }

    #[test]
    fn stopped_ring_draws_nothing() {
        let s = spinner(Variant::Ticks);
        let area = Rect::new(0, 0, 24, 12);
        let mut buf = Buffer::empty(area);
        RingView::new(&s).render(area, &mut buf);
        assert_eq!(painted_cells(&buf), 0);
    }

    #[test]
    fn running_ring_paints_cells() {
        for variant in [Variant::Ticks, Variant::Sweep] {
            let mut s = spinner(variant);
            s.start();
            let area = Rect::new(0, 0, 24, 12);
            let mut buf = Buffer::empty(area);
            RingView::new(&s).render(area, &mut buf);
            assert!(painted_cells(&buf) > 0, "{variant}");
        }
    }

    #[test]
    fn bounds_follow_the_area_aspect() {
        assert_eq!(round_bounds(10.0, 20, 10), (10.0, 10.0));
        assert_eq!(round_bounds(10.0, 40, 10), (20.0, 10.0));
        assert_eq!(round_bounds(10.0, 10, 10), (10.0, 20.0));
    }

    #[test]
    fn segment_points_outward_and_is_dimmed() {
        let s = spinner(Variant::Sweep);
        // Slot 0 of the sweep ring sits at twelve o'clock with full opacity.
        let seg = tick_segment(&s.tick_elements()[0], (0.0, 0.0), Duration::ZERO);
        assert!((seg.x1 - seg.x2).abs() < 1e-9);
        assert!(seg.y2 > seg.y1);
        assert_eq!(seg.color, Color::Rgb(255, 255, 255));

        let faint = tick_segment(&s.tick_elements()[1], (0.0, 0.0), Duration::ZERO);
        assert_ne!(faint.color, Color::Rgb(255, 255, 255));
    }
}
