//! Planar geometry on literal values.
//!
//! Used to fold spatial operators over literal operands when a dialect has
//! no native lowering. The segment formulas are the same ones the portable
//! SQL emulation emits, so folded and emulated results agree.

use crate::ast::values::{Line, LineSegment, MultiPoint, Point, Polygon};

/// Twice the signed area of the triangle (a, b, c); positive when
/// counter-clockwise.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn within_box(seg: &LineSegment, p: Point) -> bool {
    p.x >= seg.start.x.min(seg.end.x)
        && p.x <= seg.start.x.max(seg.end.x)
        && p.y >= seg.start.y.min(seg.end.y)
        && p.y <= seg.start.y.max(seg.end.y)
}

fn on_segment(seg: &LineSegment, p: Point) -> bool {
    orientation(seg.start, seg.end, p) == 0.0 && within_box(seg, p)
}

fn opposite(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// Whether two segments share at least one point.
pub fn segments_intersect(s: &LineSegment, t: &LineSegment) -> bool {
    let d1 = orientation(t.start, t.end, s.start);
    let d2 = orientation(t.start, t.end, s.end);
    let d3 = orientation(s.start, s.end, t.start);
    let d4 = orientation(s.start, s.end, t.end);

    if opposite(d1, d2) && opposite(d3, d4) {
        return true;
    }
    (d1 == 0.0 && within_box(t, s.start))
        || (d2 == 0.0 && within_box(t, s.end))
        || (d3 == 0.0 && within_box(s, t.start))
        || (d4 == 0.0 && within_box(s, t.end))
}

/// The single point where two non-parallel segments cross.
///
/// Parallel and collinear segments have no single crossing point and
/// yield `None`, even when they overlap.
pub fn segment_intersection(s: &LineSegment, t: &LineSegment) -> Option<Point> {
    let (rx, ry) = (s.end.x - s.start.x, s.end.y - s.start.y);
    let (qx, qy) = (t.end.x - t.start.x, t.end.y - t.start.y);
    let denom = rx * qy - ry * qx;
    if denom == 0.0 || !segments_intersect(s, t) {
        return None;
    }
    let (dx, dy) = (t.start.x - s.start.x, t.start.y - s.start.y);
    let u = (dx * qy - dy * qx) / denom;
    Some(Point::new(s.start.x + u * rx, s.start.y + u * ry))
}

/// Whether any segment of `a` meets any segment of `b`.
pub fn lines_intersect(a: &Line, b: &Line) -> bool {
    a.segments()
        .any(|s| b.segments().any(|t| segments_intersect(&s, &t)))
}

/// Every crossing point of two polylines, walking `a` then `b` in order.
/// Repeated points (e.g. at shared vertices) are reported once.
pub fn line_intersection_points(a: &Line, b: &Line) -> MultiPoint {
    let mut found: Vec<Point> = Vec::new();
    for s in a.segments() {
        for t in b.segments() {
            if let Some(p) = segment_intersection(&s, &t) {
                if !found.contains(&p) {
                    found.push(p);
                }
            }
        }
    }
    MultiPoint::new(found)
}

/// Signed shoelace area; positive for a counter-clockwise ring.
fn signed_area(polygon: &Polygon) -> f64 {
    let twice: f64 = polygon
        .ring()
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum();
    twice / 2.0
}

/// Unsigned area by the shoelace formula.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    signed_area(polygon).abs()
}

/// Strict interior test; points on the boundary are not contained.
pub fn polygon_contains_point(polygon: &Polygon, p: Point) -> bool {
    if polygon.edges().any(|e| on_segment(&e, p)) {
        return false;
    }
    let mut inside = false;
    for edge in polygon.edges() {
        let (a, b) = (edge.start, edge.end);
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Whether two polygons share any point, boundary included.
pub fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    a.edges().any(|s| b.edges().any(|t| segments_intersect(&s, &t)))
        || a.ring().iter().any(|p| polygon_contains_point(b, *p))
        || b.ring().iter().any(|p| polygon_contains_point(a, *p))
}

/// Inside the polygon or on its boundary.
pub fn polygon_covers_point(polygon: &Polygon, p: Point) -> bool {
    polygon.edges().any(|e| on_segment(&e, p)) || polygon_contains_point(polygon, p)
}

/// Segments crossing at a single point interior to both.
fn crosses_properly(s: &LineSegment, t: &LineSegment) -> bool {
    opposite(orientation(t.start, t.end, s.start), orientation(t.start, t.end, s.end))
        && opposite(orientation(s.start, s.end, t.start), orientation(s.start, s.end, t.end))
}

fn edges_cross(a: &Polygon, b: &Polygon) -> bool {
    a.edges().any(|s| b.edges().any(|t| crosses_properly(&s, &t)))
}

/// Ring vertices followed by edge midpoints.
fn samples(polygon: &Polygon) -> impl Iterator<Item = Point> + '_ {
    let midpoints = polygon
        .edges()
        .map(|e| Point::new((e.start.x + e.end.x) / 2.0, (e.start.y + e.end.y) / 2.0));
    polygon.ring().iter().copied().chain(midpoints)
}

/// Whether `a` contains `b`: no point of `b` lies outside `a` and the
/// interiors share a point. A polygon contains itself.
pub fn polygon_contains(a: &Polygon, b: &Polygon) -> bool {
    if edges_cross(a, b) || !samples(b).all(|p| polygon_covers_point(a, p)) {
        return false;
    }
    samples(b).any(|p| polygon_contains_point(a, p)) || polygon_area(a) == polygon_area(b)
}

fn interiors_meet(a: &Polygon, b: &Polygon) -> bool {
    edges_cross(a, b)
        || samples(b).any(|p| polygon_contains_point(a, p))
        || samples(a).any(|p| polygon_contains_point(b, p))
        || polygon_contains(a, b)
        || polygon_contains(b, a)
}

/// The polygons meet only along their boundaries.
pub fn polygons_touch(a: &Polygon, b: &Polygon) -> bool {
    polygons_intersect(a, b) && !interiors_meet(a, b)
}

/// The polygons intersect and neither contains the other.
pub fn polygons_overlap(a: &Polygon, b: &Polygon) -> bool {
    polygons_intersect(a, b) && !polygon_contains(a, b) && !polygon_contains(b, a)
}

fn is_convex(polygon: &Polygon) -> bool {
    let Some((_, open)) = polygon.ring().split_last() else {
        return false;
    };
    let n = open.len();
    let turns: Vec<f64> = (0..n)
        .map(|i| orientation(open[i], open[(i + 1) % n], open[(i + 2) % n]))
        .filter(|turn| *turn != 0.0)
        .collect();
    turns.iter().all(|t| *t > 0.0) || turns.iter().all(|t| *t < 0.0)
}

/// Where the segment `p`-`q` meets the infinite line through `edge`.
fn meet_edge_line(p: Point, q: Point, edge: &LineSegment) -> Option<Point> {
    let dp = orientation(edge.start, edge.end, p);
    let dq = orientation(edge.start, edge.end, q);
    if dp == dq {
        return None;
    }
    let t = dp / (dp - dq);
    Some(Point::new(p.x + t * (q.x - p.x), p.y + t * (q.y - p.y)))
}

/// Clip `subject` to a convex `clip` polygon (Sutherland-Hodgman).
///
/// Returns the open ring of the shared region, which has fewer than three
/// points when the polygons only touch. `None` when `clip` is not convex.
pub fn clip_to_convex(subject: &Polygon, clip: &Polygon) -> Option<Vec<Point>> {
    if !is_convex(clip) {
        return None;
    }
    let winding = signed_area(clip).signum();
    let mut output: Vec<Point> = subject
        .ring()
        .split_last()
        .map(|(_, open)| open.to_vec())
        .unwrap_or_default();
    for edge in clip.edges() {
        let input = std::mem::take(&mut output);
        let inside = |p: Point| orientation(edge.start, edge.end, p) * winding >= 0.0;
        for (i, &current) in input.iter().enumerate() {
            let previous = input[(i + input.len() - 1) % input.len()];
            match (inside(previous), inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.extend(meet_edge_line(previous, current, &edge)),
                (false, true) => {
                    output.extend(meet_edge_line(previous, current, &edge));
                    output.push(current);
                }
                (false, false) => {}
            }
        }
    }
    output.dedup();
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    Some(output)
}
