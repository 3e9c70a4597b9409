use std::f64::consts::PI;

/// Style of curve terminator at an open line's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndCapStyle {
    /// Semicircular arc around the endpoint.
    #[default]
    Round,
    /// Truncated flat at the line end.
    Flat,
    /// Squared off at the buffer distance beyond the line end.
    Square,
}

/// Style of join between consecutive offset segments at convex corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    /// Circular fillet arc.
    #[default]
    Round,
    /// Extension of the offset lines to their intersection, bounded by the
    /// mitre limit.
    Mitre,
    /// Straight segment between the offset endpoints.
    Bevel,
}

/// Default number of fillet segments per quarter circle.
pub const DEFAULT_QUADRANT_SEGMENTS: u32 = 8;

/// Default mitre ratio limit.
pub const DEFAULT_MITRE_LIMIT: f64 = 5.0;

/// Configuration for a buffer computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferParameters {
    quadrant_segments: u32,
    end_cap_style: EndCapStyle,
    join_style: JoinStyle,
    mitre_limit: f64,
    single_sided: bool,
}

impl Default for BufferParameters {
    fn default() -> Self {
        Self {
            quadrant_segments: DEFAULT_QUADRANT_SEGMENTS,
            end_cap_style: EndCapStyle::default(),
            join_style: JoinStyle::default(),
            mitre_limit: DEFAULT_MITRE_LIMIT,
            single_sided: false,
        }
    }
}

impl BufferParameters {
    /// Creates parameters with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters with a given fillet resolution.
    #[must_use]
    pub fn with_quadrant_segments(quadrant_segments: u32) -> Self {
        let mut params = Self::default();
        params.set_quadrant_segments(quadrant_segments);
        params
    }

    /// Creates parameters with a given fillet resolution and end cap style.
    #[must_use]
    pub fn with_cap_style(quadrant_segments: u32, end_cap_style: EndCapStyle) -> Self {
        let mut params = Self::with_quadrant_segments(quadrant_segments);
        params.end_cap_style = end_cap_style;
        params
    }

    /// Number of fillet segments per quarter circle (always at least 1).
    #[must_use]
    pub fn quadrant_segments(&self) -> u32 {
        self.quadrant_segments
    }

    /// Sets the fillet resolution, clamped to a minimum of 1.
    pub fn set_quadrant_segments(&mut self, quadrant_segments: u32) {
        self.quadrant_segments = quadrant_segments.max(1);
    }

    /// The angle subtended by one fillet segment.
    #[must_use]
    pub fn fillet_angle_quantum(&self) -> f64 {
        PI / 2.0 / f64::from(self.quadrant_segments)
    }

    #[must_use]
    pub fn end_cap_style(&self) -> EndCapStyle {
        self.end_cap_style
    }

    pub fn set_end_cap_style(&mut self, end_cap_style: EndCapStyle) {
        self.end_cap_style = end_cap_style;
    }

    #[must_use]
    pub fn join_style(&self) -> JoinStyle {
        self.join_style
    }

    pub fn set_join_style(&mut self, join_style: JoinStyle) {
        self.join_style = join_style;
    }

    /// Ratio bounding how far a mitre spike may extend, as a multiple of the
    /// buffer distance.
    #[must_use]
    pub fn mitre_limit(&self) -> f64 {
        self.mitre_limit
    }

    pub fn set_mitre_limit(&mut self, mitre_limit: f64) {
        self.mitre_limit = mitre_limit;
    }

    /// Whether to buffer only one side of line inputs. The side is selected
    /// by the sign of the buffer distance (positive = left).
    #[must_use]
    pub fn single_sided(&self) -> bool {
        self.single_sided
    }

    pub fn set_single_sided(&mut self, single_sided: bool) {
        self.single_sided = single_sided;
    }
}
