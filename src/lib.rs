pub mod buffer;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod noding;
pub(crate) mod polygonize;

pub use buffer::{
    buffer, buffer_with_cap_style, buffer_with_parameters, buffer_with_quadrant_segments,
    BufferParameters, EndCapStyle, JoinStyle,
};
pub use error::{BufferError, Result};
pub use geometry::{Geometry, LineString, Polygon};
