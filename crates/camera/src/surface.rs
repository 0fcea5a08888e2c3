use foundation::easing::Easing;
use foundation::geo::LngLat;

use crate::pose::CameraPose;

/// Partial camera target: only the `Some` fields are touched.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraMove {
    pub center: Option<LngLat>,
    pub zoom: Option<f64>,
    pub bearing: Option<f64>,
    pub pitch: Option<f64>,
}

impl CameraMove {
    pub fn center(center: LngLat) -> Self {
        Self {
            center: Some(center),
            ..Self::default()
        }
    }
}

/// Parametric interpolation toward a target over a duration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EaseTo {
    pub target: CameraMove,
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Curved parametric transition toward a target (a "fly" in map-viewport
/// terms); the curve itself is the surface's business.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyTo {
    pub target: CameraMove,
    pub duration_ms: f64,
}

/// What the attached rendering surface can do, declared once up front.
///
/// Checked at director construction instead of probing per call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// Supports `ease_to`/`fly_to` interpolation.
    pub parametric_motion: bool,
    /// Emits box-selection signals (`BoxZoomStart`/`BoxZoomCancel`).
    pub box_selection: bool,
}

/// The narrow camera-mutation contract the core consumes from the rendering
/// surface. Implementations own the [`CameraPose`] exclusively; the active
/// animation session is the only caller mutating it at any time.
pub trait CameraSurface {
    fn pose(&self) -> CameraPose;

    /// False until the host surface has finished initializing.
    fn is_ready(&self) -> bool;

    fn capabilities(&self) -> SurfaceCapabilities;

    /// Instantaneous bearing write (wrapped mod 360).
    fn set_bearing(&mut self, bearing_deg: f64);

    /// Instantaneous jump; only the fields present in the move change.
    fn jump_to(&mut self, target: CameraMove);

    fn ease_to(&mut self, ease: EaseTo);

    fn fly_to(&mut self, fly: FlyTo);

    /// Cancels any in-flight parametric transition, leaving the pose as the
    /// interruption found it.
    fn stop_motion(&mut self);

    fn center(&self) -> LngLat {
        self.pose().center()
    }

    fn zoom(&self) -> f64 {
        self.pose().zoom
    }

    fn bearing(&self) -> f64 {
        self.pose().bearing
    }

    fn pitch(&self) -> f64 {
        self.pose().pitch
    }
}
