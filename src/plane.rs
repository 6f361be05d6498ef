//! Plane geometry derived from the floor estimate.
//!
//! Planes use the `dot(normal, point) = distance` convention, so a floor at
//! `y = h` with an upward normal has distance `h`.
use glam::{Vec3, Vec4};

/// Position and up direction the published plane is anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAnchor {
    /// World-space anchor position.
    pub position: Vec3,
    /// Up direction; normalised when the plane is derived.
    pub up: Vec3,
}

impl Default for PlaneAnchor {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

/// A half-space boundary: unit normal plus signed distance from the origin.
///
/// Equality is exact per component, which is what the publisher's change
/// detection relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPlane {
    /// Unit normal.
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`.
    pub distance: f32,
}

impl FloorPlane {
    /// Builds the plane with normal `normal` passing through `point`.
    ///
    /// A zero or non-finite `normal` falls back to `Vec3::Y`.
    #[must_use]
    pub fn from_point(normal: Vec3, point: Vec3) -> Self {
        let unit = unit_or_up(normal);
        Self {
            normal: unit,
            distance: unit.dot(point),
        }
    }

    /// Derives the floor plane for `anchor` at world height `height`.
    ///
    /// The plane passes through the anchor position with its `y` replaced by
    /// `height`. With an upright anchor the distance is exactly `height`, so
    /// horizontal or vertical anchor movement does not change the plane.
    ///
    /// # Examples
    ///
    /// ```
    /// use floor_detect::{FloorPlane, PlaneAnchor};
    /// use glam::{Vec3, Vec4};
    ///
    /// let plane = FloorPlane::at_height(&PlaneAnchor::default(), 1.05);
    /// assert_eq!(plane.to_vec4(), Vec4::new(0.0, 1.0, 0.0, 1.05));
    /// ```
    #[must_use]
    pub fn at_height(anchor: &PlaneAnchor, height: f32) -> Self {
        let origin = Vec3::new(anchor.position.x, height, anchor.position.z);
        Self::from_point(anchor.up, origin)
    }

    /// Packs the plane as `[nx, ny, nz, distance]`.
    #[must_use]
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.distance)
    }

    /// Signed distance of `point` above the plane.
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

fn unit_or_up(direction: Vec3) -> Vec3 {
    if !direction.is_finite() {
        return Vec3::Y;
    }
    direction.try_normalize().unwrap_or(Vec3::Y)
}
