use curvix::geometry::{OrientedRect, Rect, Segment2};
use curvix::intersect::{overlapping_pairs, Shape2};
use curvix::math::{Point2, Tolerance, Vector2};

/// Scans the walked polyline against a few fixed obstacles and logs every
/// segment that touches one.
pub fn report_overlaps(polyline: &[Point2]) {
    let tol = Tolerance::default();
    let obstacles = [
        Shape2::Rect(Rect::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0))),
        Shape2::Oriented(OrientedRect::new(Point2::new(6.5, 2.5), Vector2::new(1.0, 0.3), 0.6)),
        Shape2::Rect(Rect::new(Point2::new(11.0, -1.0), Point2::new(12.0, 1.0))),
    ];

    let mut shapes: Vec<Shape2> = obstacles.to_vec();
    shapes.extend(
        polyline
            .windows(2)
            .map(|w| Shape2::Segment(Segment2::new(w[0], w[1]))),
    );

    let hits: Vec<(usize, usize)> = overlapping_pairs(&shapes, tol)
        .into_iter()
        .filter(|&(i, j)| i < obstacles.len() && j >= obstacles.len())
        .collect();

    for (obstacle, shape) in &hits {
        tracing::info!(obstacle, segment = shape - obstacles.len(), "overlap");
    }
    if hits.is_empty() {
        tracing::info!("path is clear");
    }
}
