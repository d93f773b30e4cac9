// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path accumulation buffer.
//!
//! Path commands are merged into a single [`BezPath`] as they arrive; nothing
//! is drawn until the buffer is consumed by a draw or clip command.
//!
//! Angles taken by this module are in degrees, with positive values turning
//! counter-clockwise on screen (the y axis points down).
//!
//! Curved shapes with a non-finite center, radius, angle or bounding rect
//! are ignored.

use std::f64::consts::{FRAC_PI_2, PI};
use std::mem;

use piet::kurbo::{Arc, BezPath, Ellipse, PathEl, Point, Rect, Shape, Vec2};

use crate::config::DEFAULT_TOLERANCE;

/// A full turn, in degrees.
const FULL_TURN: f64 = 360.0;

/// Arc tolerance never drops below this fraction of the radius, which
/// bounds the number of segments a single arc can produce.
const MIN_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Geometry collected between a clear and a draw or clip.
#[derive(Clone, Debug)]
pub struct PathAccumulator {
    path: BezPath,
    /// Start of the current subpath.
    start: Point,
    /// Set when the last subpath was closed; the next segment opens a new
    /// subpath at `start`.
    closed: bool,
    tolerance: f64,
}

impl PathAccumulator {
    pub fn new() -> PathAccumulator {
        PathAccumulator::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create an empty buffer that flattens arcs to within `tolerance`.
    pub fn with_tolerance(tolerance: f64) -> PathAccumulator {
        PathAccumulator {
            path: BezPath::new(),
            start: Point::ORIGIN,
            closed: false,
            tolerance,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The accumulated path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Returns `true` if there is nothing to draw.
    ///
    /// A path made only of move-to elements is empty.
    pub fn is_empty(&self) -> bool {
        self.path
            .elements()
            .iter()
            .all(|el| matches!(el, PathEl::MoveTo(_)))
    }

    pub fn clear(&mut self) {
        self.path = BezPath::new();
        self.start = Point::ORIGIN;
        self.closed = false;
    }

    /// Take the accumulated path, leaving the buffer empty.
    pub fn take(&mut self) -> BezPath {
        let path = mem::take(&mut self.path);
        self.clear();
        path
    }

    pub fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.start = p;
        self.closed = false;
    }

    pub fn line_to(&mut self, p: Point) {
        self.ensure_subpath();
        self.path.line_to(p);
    }

    /// Cubic Bézier from the current point to `end`.
    ///
    /// The end point comes first, then the two control points.
    pub fn cubic_to(&mut self, end: Point, c1: Point, c2: Point) {
        self.ensure_subpath();
        self.path.curve_to(c1, c2, end);
    }

    /// Quadratic Bézier from the current point to `end`, end point first.
    pub fn quad_to(&mut self, end: Point, c: Point) {
        self.ensure_subpath();
        self.path.quad_to(c, end);
    }

    pub fn close_path(&mut self) {
        if self.path.elements().is_empty() || self.closed {
            return;
        }
        self.path.close_path();
        self.closed = true;
    }

    /// Append `rect` as a closed subpath.
    pub fn add_rect(&mut self, rect: Rect) {
        self.extend_closed(rect.path_elements(self.tolerance));
    }

    /// Append `rect` with elliptical corners of radii `rx` and `ry`.
    ///
    /// Radii are clamped to half the rectangle's size; a non-positive radius
    /// appends a plain rectangle.
    pub fn add_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) {
        if !is_finite_rect(rect) {
            return;
        }
        if rx <= 0.0 || ry <= 0.0 {
            self.add_rect(rect);
            return;
        }
        let r = rect.abs();
        let radii = Vec2::new(rx.min(r.width() / 2.0), ry.min(r.height() / 2.0));
        let tolerance = self.arc_tolerance(radii.x.max(radii.y));

        self.move_to(Point::new(r.x0 + radii.x, r.y0));
        let corners = [
            (Point::new(r.x1 - radii.x, r.y0 + radii.y), -FRAC_PI_2),
            (Point::new(r.x1 - radii.x, r.y1 - radii.y), 0.0),
            (Point::new(r.x0 + radii.x, r.y1 - radii.y), FRAC_PI_2),
            (Point::new(r.x0 + radii.x, r.y0 + radii.y), PI),
        ];
        for (center, start_angle) in corners {
            let arc = Arc {
                center,
                radii,
                start_angle,
                sweep_angle: FRAC_PI_2,
                x_rotation: 0.0,
            };
            self.path.line_to(arc_point(&arc, start_angle));
            self.append_arc(&arc, tolerance);
        }
        self.close_path();
    }

    /// Append the ellipse inscribed in `rect` as a closed subpath.
    pub fn add_ellipse(&mut self, rect: Rect) {
        if !is_finite_rect(rect) {
            return;
        }
        let ellipse = Ellipse::from_rect(rect);
        let radii = ellipse.radii();
        let tolerance = self.arc_tolerance(radii.x.max(radii.y));
        self.extend_closed(ellipse.path_elements(tolerance));
    }

    /// Append a pie slice: a move to `center`, a line to the start of the
    /// arc, the arc, and a closing line.
    pub fn add_wedge(&mut self, center: Point, radius: f64, start_angle: f64, sweep: f64) {
        if !all_finite(&[center.x, center.y, radius, start_angle, sweep]) {
            return;
        }
        self.move_to(center);
        let arc = circle_arc(center, radius, start_angle, sweep);
        let tolerance = self.arc_tolerance(radius);
        self.path.line_to(arc_point(&arc, arc.start_angle));
        self.append_arc(&arc, tolerance);
        self.close_path();
    }

    /// Append the part of a wedge of radius `outer` that lies outside the
    /// circle of radius `inner`.
    ///
    /// The boundary is built directly from the outer arc, a radial segment,
    /// the inner arc traversed backwards, and a closing radial segment. The
    /// sign of `inner` is ignored; a zero inner radius gives the plain wedge.
    pub fn add_annular_wedge(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        start_angle: f64,
        sweep: f64,
    ) {
        if !all_finite(&[center.x, center.y, inner, outer, start_angle, sweep]) {
            return;
        }
        let inner = inner.abs();
        if outer <= 0.0 || inner >= outer {
            return;
        }
        if inner == 0.0 {
            self.add_wedge(center, outer, start_angle, sweep);
            return;
        }

        let outer_arc = circle_arc(center, outer, start_angle, sweep);
        let end_angle = outer_arc.start_angle + outer_arc.sweep_angle;
        let inner_arc = Arc {
            center,
            radii: Vec2::new(inner, inner),
            start_angle: end_angle,
            sweep_angle: -outer_arc.sweep_angle,
            x_rotation: 0.0,
        };

        let tolerance = self.arc_tolerance(outer);
        self.move_to(arc_point(&outer_arc, outer_arc.start_angle));
        self.append_arc(&outer_arc, tolerance);
        self.path.line_to(arc_point(&inner_arc, end_angle));
        self.append_arc(&inner_arc, tolerance);
        self.close_path();
    }

    /// Open a subpath if the next segment would otherwise have no start.
    fn ensure_subpath(&mut self) {
        if self.path.elements().is_empty() {
            self.move_to(Point::ORIGIN);
        } else if self.closed {
            let start = self.start;
            self.move_to(start);
        }
    }

    /// The flattening tolerance for an arc of `radius`.
    fn arc_tolerance(&self, radius: f64) -> f64 {
        self.tolerance.max(radius.abs() * MIN_RELATIVE_TOLERANCE)
    }

    fn append_arc(&mut self, arc: &Arc, tolerance: f64) {
        for el in arc.append_iter(tolerance) {
            self.path.push(el);
        }
    }

    /// Append a closed shape's elements; the shape's first point becomes the
    /// start of the current subpath.
    fn extend_closed(&mut self, elements: impl Iterator<Item = PathEl>) {
        for el in elements {
            match el {
                PathEl::MoveTo(p) => self.move_to(p),
                PathEl::ClosePath => self.close_path(),
                el => self.path.push(el),
            }
        }
        self.close_path();
    }
}

impl Default for PathAccumulator {
    fn default() -> Self {
        PathAccumulator::new()
    }
}

/// A circular arc in kurbo's convention from screen-space degrees.
fn circle_arc(center: Point, radius: f64, start_angle: f64, sweep: f64) -> Arc {
    let sweep = sweep.clamp(-FULL_TURN, FULL_TURN);
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: -start_angle.to_radians(),
        sweep_angle: -sweep.to_radians(),
        x_rotation: 0.0,
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn is_finite_rect(rect: Rect) -> bool {
    all_finite(&[rect.x0, rect.y0, rect.x1, rect.y1, rect.width(), rect.height()])
}

fn arc_point(arc: &Arc, angle: f64) -> Point {
    arc.center + Vec2::new(arc.radii.x * angle.cos(), arc.radii.y * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_close {
        ($val:expr, $target:expr, $tolerance:expr) => {{
            let (val, target) = ($val, $target);
            if (val - target).abs() > $tolerance {
                panic!(
                    "value {} outside target {} with tolerance {}",
                    val, target, $tolerance
                );
            }
        }};
    }

    fn last_point(path: &BezPath) -> Point {
        path.elements()
            .iter()
            .rev()
            .find_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .unwrap()
    }

    #[test]
    fn move_only_path_is_empty() {
        let mut acc = PathAccumulator::new();
        assert!(acc.is_empty());
        acc.move_to(Point::new(3.0, 4.0));
        assert!(acc.is_empty());
        acc.line_to(Point::new(5.0, 4.0));
        assert!(!acc.is_empty());
    }

    #[test]
    fn line_on_empty_path_starts_at_origin() {
        let mut acc = PathAccumulator::new();
        acc.line_to(Point::new(10.0, 0.0));
        assert_eq!(
            acc.path().elements(),
            &[
                PathEl::MoveTo(Point::ORIGIN),
                PathEl::LineTo(Point::new(10.0, 0.0))
            ]
        );
    }

    #[test]
    fn curves_take_end_point_first() {
        let end = Point::new(10.0, 0.0);
        let c1 = Point::new(2.0, 5.0);
        let c2 = Point::new(8.0, 5.0);
        let mut acc = PathAccumulator::new();
        acc.move_to(Point::ORIGIN);
        acc.cubic_to(end, c1, c2);
        acc.quad_to(Point::new(20.0, 0.0), Point::new(15.0, -5.0));
        assert_eq!(acc.path().elements()[1], PathEl::CurveTo(c1, c2, end));
        assert_eq!(
            acc.path().elements()[2],
            PathEl::QuadTo(Point::new(15.0, -5.0), Point::new(20.0, 0.0))
        );
    }

    #[test]
    fn segment_after_close_reopens_at_subpath_start() {
        let mut acc = PathAccumulator::new();
        acc.add_rect(Rect::new(1.0, 2.0, 5.0, 6.0));
        acc.line_to(Point::new(9.0, 9.0));
        let els = acc.path().elements();
        assert_eq!(els[els.len() - 2], PathEl::MoveTo(Point::new(1.0, 2.0)));
        assert_eq!(els[els.len() - 1], PathEl::LineTo(Point::new(9.0, 9.0)));
    }

    #[test]
    fn rect_is_closed() {
        let mut acc = PathAccumulator::new();
        acc.add_rect(Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(acc.path().elements().last(), Some(&PathEl::ClosePath));
        assert_close!(acc.path().area().abs(), 12.0, 1e-9);
    }

    #[test]
    fn rounded_rect_radii_are_clamped() {
        let mut acc = PathAccumulator::new();
        acc.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 50.0, 50.0);
        // fully rounded: a circle of radius 5
        assert_close!(acc.path().area().abs(), PI * 25.0, 0.05);
        assert_close!(acc.path().bounding_box().width(), 10.0, 1e-6);
    }

    #[test]
    fn rounded_rect_without_radius_is_a_rect() {
        let mut plain = PathAccumulator::new();
        plain.add_rect(Rect::new(0.0, 0.0, 4.0, 3.0));
        let mut rounded = PathAccumulator::new();
        rounded.add_rounded_rect(Rect::new(0.0, 0.0, 4.0, 3.0), 0.0, 2.0);
        assert_eq!(plain.path(), rounded.path());
    }

    #[test]
    fn ellipse_fits_rect() {
        let mut acc = PathAccumulator::new();
        acc.add_ellipse(Rect::new(10.0, 20.0, 30.0, 30.0));
        let bbox = acc.path().bounding_box();
        assert_close!(bbox.x0, 10.0, 1e-6);
        assert_close!(bbox.y1, 30.0, 1e-6);
        assert_close!(acc.path().area().abs(), PI * 10.0 * 5.0, 0.05);
    }

    #[test]
    fn quarter_wedge_turns_counter_clockwise() {
        let mut acc = PathAccumulator::new();
        acc.add_wedge(Point::ORIGIN, 10.0, 0.0, 90.0);
        let els = acc.path().elements();
        assert_eq!(els[0], PathEl::MoveTo(Point::ORIGIN));
        match els[1] {
            PathEl::LineTo(p) => {
                assert_close!(p.x, 10.0, 1e-9);
                assert_close!(p.y, 0.0, 1e-9);
            }
            ref el => panic!("expected line to arc start, got {:?}", el),
        }
        // 90 degrees counter-clockwise on a y-down screen is straight up
        let end = last_point(acc.path());
        assert_close!(end.x, 0.0, 1e-9);
        assert_close!(end.y, -10.0, 1e-9);
        assert_close!(acc.path().area().abs(), PI * 100.0 / 4.0, 0.05);
    }

    #[test]
    fn wedge_sweep_is_clamped_to_a_turn() {
        let mut acc = PathAccumulator::new();
        acc.add_wedge(Point::ORIGIN, 1.0, 0.0, 720.0);
        assert_close!(acc.path().area().abs(), PI, 0.01);
    }

    #[test]
    fn annular_wedge_area() {
        let mut acc = PathAccumulator::new();
        acc.add_annular_wedge(Point::new(50.0, 50.0), 10.0, 20.0, 30.0, 90.0);
        let expected = PI * (20.0 * 20.0 - 10.0 * 10.0) / 4.0;
        assert_close!(acc.path().area().abs(), expected, 0.1);
    }

    #[test]
    fn full_annular_wedge_is_a_ring() {
        let mut acc = PathAccumulator::new();
        acc.add_annular_wedge(Point::ORIGIN, 5.0, 10.0, 0.0, 360.0);
        assert_close!(acc.path().area().abs(), PI * 75.0, 0.1);
        assert!(!acc.path().contains(Point::ORIGIN));
    }

    #[test]
    fn degenerate_annular_wedges() {
        let mut acc = PathAccumulator::new();
        acc.add_annular_wedge(Point::ORIGIN, 20.0, 10.0, 0.0, 90.0);
        assert!(acc.path().elements().is_empty());

        let mut wedge = PathAccumulator::new();
        wedge.add_wedge(Point::ORIGIN, 10.0, 0.0, 90.0);
        let mut annular = PathAccumulator::new();
        annular.add_annular_wedge(Point::ORIGIN, 0.0, 10.0, 0.0, 90.0);
        assert_eq!(wedge.path(), annular.path());
    }

    #[test]
    fn negative_inner_radius_uses_its_magnitude() {
        let mut negative = PathAccumulator::new();
        negative.add_annular_wedge(Point::ORIGIN, -5.0, 10.0, 0.0, 90.0);
        let mut positive = PathAccumulator::new();
        positive.add_annular_wedge(Point::ORIGIN, 5.0, 10.0, 0.0, 90.0);
        assert_eq!(negative.path(), positive.path());

        let mut swallowed = PathAccumulator::new();
        swallowed.add_annular_wedge(Point::ORIGIN, -12.0, 10.0, 0.0, 90.0);
        assert!(swallowed.path().elements().is_empty());
    }

    #[test]
    fn non_finite_curves_are_ignored() {
        let inf = f64::INFINITY;
        let mut acc = PathAccumulator::new();
        acc.add_wedge(Point::ORIGIN, inf, 0.0, 90.0);
        acc.add_wedge(Point::new(f64::NAN, 0.0), 1.0, 0.0, 90.0);
        acc.add_annular_wedge(Point::ORIGIN, 1.0, inf, 0.0, 90.0);
        acc.add_annular_wedge(Point::ORIGIN, 1.0, 2.0, 0.0, inf);
        acc.add_ellipse(Rect::new(0.0, 0.0, inf, 10.0));
        acc.add_ellipse(Rect::new(-1e308, 0.0, 1e308, 10.0));
        acc.add_rounded_rect(Rect::new(0.0, 0.0, inf, 10.0), 2.0, 2.0);
        assert!(acc.path().elements().is_empty());

        // huge radii clamp against the rect instead
        acc.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), inf, inf);
        assert_close!(acc.path().area().abs(), PI * 25.0, 0.05);
    }

    #[test]
    fn huge_radii_stay_small() {
        for r in [1e12, 1e36, 1e300] {
            let mut acc = PathAccumulator::new();
            acc.add_wedge(Point::ORIGIN, r, 0.0, 90.0);
            acc.add_annular_wedge(Point::ORIGIN, r / 2.0, r, 0.0, 360.0);
            acc.add_ellipse(Rect::new(0.0, 0.0, r, r));
            acc.add_rounded_rect(Rect::new(0.0, 0.0, r, r), r / 4.0, r / 4.0);
            let n = acc.path().elements().len();
            assert!(n > 0 && n < 1000, "radius {r}: {n} elements");
        }
    }

    #[test]
    fn take_leaves_buffer_empty() {
        let mut acc = PathAccumulator::new();
        acc.add_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let path = acc.take();
        assert!(!path.elements().is_empty());
        assert!(acc.is_empty());
        assert!(acc.path().elements().is_empty());
    }
}
