use curvix::math::{Point2, Vector2};
use curvix::spline::{CatmullRom, Curve, ParamMode, SplineConfig};
use curvix::Result;

/// A wavy Catmull-Rom path through a handful of waypoints.
pub fn build_spline() -> Result<CatmullRom<2>> {
    let waypoints = vec![
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 3.0),
        Point2::new(5.0, 1.0),
        Point2::new(8.0, 4.0),
        Point2::new(10.0, 0.0),
    ];
    let spline = CatmullRom::new(waypoints, SplineConfig::default())?;
    tracing::info!(
        segments = spline.segment_count(),
        table_length = spline.total_length(),
        chord_length = spline.length(256),
        "built spline"
    );
    Ok(spline)
}

/// Points every `step` units of arc length, ending at the last waypoint.
pub fn walk(spline: &CatmullRom<2>, step: f64) -> Vec<Point2> {
    let total = spline.total_length();
    let mut points = Vec::new();
    let mut d = 0.0;
    while d < total {
        let p = spline.evaluate_by_distance(d);
        tracing::debug!(distance = d, x = p.x, y = p.y, "walk");
        points.push(p);
        d += step;
    }
    points.push(spline.evaluate_by_distance(total));
    tracing::info!(samples = points.len(), step, "walked spline");
    points
}

/// Logs the heading at each waypoint.
pub fn report_tangents(spline: &CatmullRom<2>) -> Result<()> {
    for i in 0..=spline.segment_count() {
        let t = spline.control_point_parameter(i)?;
        let dir = spline.unit_tangent(t, ParamMode::Strict)?;
        let heading = Vector2::x().angle(&dir).to_degrees() * dir.y.signum();
        tracing::info!(waypoint = i, t, heading, "tangent");
    }
    Ok(())
}
