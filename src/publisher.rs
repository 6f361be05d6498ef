//! Change-gated publication of the floor plane and angular tolerance.
//!
//! Each tick derives the floor plane and compares it with the last plane
//! pushed, component by component and without tolerance. Only a difference
//! reaches the sink. The angular tolerance is gated the same way and starts
//! from an unset state so the first tick always pushes it.

use log::debug;

use crate::plane::{FloorPlane, PlaneAnchor};
use crate::sink::PlaneSink;

/// What a single tick pushed to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// The plane vector was pushed.
    pub plane_pushed: bool,
    /// The angular tolerance was pushed.
    pub tolerance_pushed: bool,
}

/// Derives the floor plane every tick and forwards changes to a [`PlaneSink`].
#[derive(Debug)]
pub struct PlanePublisher {
    margin: f32,
    angle_tolerance: f32,
    plane_property: String,
    tolerance_property: String,
    last_plane: Option<FloorPlane>,
    last_tolerance: Option<f32>,
}

impl PlanePublisher {
    /// Creates a publisher writing to the given property names.
    #[must_use]
    pub fn new(
        margin: f32,
        angle_tolerance: f32,
        plane_property: impl Into<String>,
        tolerance_property: impl Into<String>,
    ) -> Self {
        Self {
            margin,
            angle_tolerance,
            plane_property: plane_property.into(),
            tolerance_property: tolerance_property.into(),
            last_plane: None,
            last_tolerance: None,
        }
    }

    /// Publishes the plane for `floor_y` and the current tolerance, skipping
    /// values identical to the previous push.
    pub fn tick(
        &mut self,
        anchor: &PlaneAnchor,
        floor_y: f32,
        sink: &mut PlaneSink,
    ) -> PublishReport {
        let plane = FloorPlane::at_height(anchor, floor_y + self.margin);
        let plane_pushed = self.last_plane != Some(plane);
        if plane_pushed {
            let vector = plane.to_vec4();
            let delivered = sink.push_vector(&self.plane_property, vector);
            debug!(
                "pushed floor plane {vector} to {delivered} target(s) as {}",
                self.plane_property
            );
            self.last_plane = Some(plane);
        }

        // `Some(NaN) != Some(NaN)`, so a NaN tolerance is pushed every tick.
        let tolerance_pushed = self.last_tolerance != Some(self.angle_tolerance);
        if tolerance_pushed {
            let delivered = sink.push_float(&self.tolerance_property, self.angle_tolerance);
            debug!(
                "pushed angle tolerance {} to {delivered} target(s) as {}",
                self.angle_tolerance, self.tolerance_property
            );
            self.last_tolerance = Some(self.angle_tolerance);
        }

        PublishReport {
            plane_pushed,
            tolerance_pushed,
        }
    }

    /// Changes the tolerance; the next tick pushes it if it differs.
    pub const fn set_angle_tolerance(&mut self, degrees: f32) {
        self.angle_tolerance = degrees;
    }

    /// Configured angular tolerance in degrees.
    #[must_use]
    pub const fn angle_tolerance(&self) -> f32 {
        self.angle_tolerance
    }

    /// Offset added to the floor height.
    #[must_use]
    pub const fn margin(&self) -> f32 {
        self.margin
    }

    /// The most recently pushed plane.
    #[must_use]
    pub const fn last_plane(&self) -> Option<FloorPlane> {
        self.last_plane
    }
}
