pub mod geometry;
pub mod gesture;

pub use geometry::{Geometry, GeometryProvider};
pub use gesture::{GestureResolver, PointerId};
