#![cfg_attr(docsrs, feature(doc_cfg))]
//! Floor height estimation and floor plane publishing.
//!
//! Plane samples from an external spatial-sensing service are averaged over
//! a sliding time window to estimate the floor height. Each frame the
//! estimate is turned into a plane and pushed to consumers when it changes.
pub mod config;
pub mod constants;
pub mod detector;
pub mod estimator;
pub mod logging;
pub mod plane;
#[cfg(feature = "plugin")]
#[cfg_attr(docsrs, doc(cfg(feature = "plugin")))]
pub mod plugin;
pub mod publisher;
pub mod sample;
pub mod sink;
pub use constants::*;

// Re-export commonly used items
pub use config::{ConfigError, FloorDetectionConfig, SinkMode};
pub use detector::FloorDetector;
pub use estimator::{FloorEstimate, FloorHeightEstimator, Measurement, MeasurementWindow};
pub use logging::init as init_logging;
pub use plane::{FloorPlane, PlaneAnchor};
#[cfg(feature = "plugin")]
#[cfg_attr(docsrs, doc(cfg(feature = "plugin")))]
pub use plugin::{FloorAnchor, FloorDetectionError, FloorDetectionPlugin, PlanesUpdated};
pub use publisher::{PlanePublisher, PublishReport};
pub use sample::{PlaneSample, SemanticFlags};
pub use sink::{BoxedTarget, PlaneSink, PropertyBlock, PropertyTarget};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use floor_detect::prelude::*;
    //! ```

    pub use crate::FloorDetectionConfig;
    pub use crate::FloorDetector;
    pub use crate::PlaneAnchor;
    pub use crate::PlaneSample;
    pub use crate::PropertyTarget;
    pub use crate::SemanticFlags;
    #[cfg(feature = "plugin")]
    pub use crate::{FloorAnchor, FloorDetectionPlugin, PlanesUpdated};
}
