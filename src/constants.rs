//! Defaults and property names shared across the floor detection pipeline.

/// Duration in seconds that a floor measurement contributes to the average.
pub const DEFAULT_MAX_AGE: f64 = 2.0;

/// Offset added to the estimated floor height before deriving the published
/// plane. Envelops sensor noise lying just above the floor.
pub const DEFAULT_MARGIN: f32 = 0.05;

/// Edge length of the square region the sensor detects planes in.
pub const DEFAULT_BOUNDS_SIZE: f32 = 10.0;

/// Maximum angle in degrees between a surface normal and the floor normal for
/// consumers to treat the surface as floor.
pub const DEFAULT_ANGLE_TOLERANCE: f32 = 20.0;

/// Property receiving the `[nx, ny, nz, distance]` floor plane vector.
pub const FLOOR_PLANE_PROPERTY: &str = "_FloorPlane";

/// Property receiving the angular tolerance scalar.
pub const FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY: &str = "_FloorNormalAngleMaxDelta";
