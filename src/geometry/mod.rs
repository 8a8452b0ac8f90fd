mod plane;
mod ray;
mod rect;
mod segment;
mod triangle;

pub use plane::{Plane, PointPlaneClassification};
pub use ray::{Ray, Ray2, Ray3};
pub use rect::{OrientedRect, Rect};
pub use segment::{Segment, Segment2, Segment3};
pub use triangle::Triangle;

pub(crate) use triangle::barycentric_inside;
