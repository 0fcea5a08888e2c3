use camera::{CameraMove, CameraSurface};
use foundation::geo::{LngLat, wrap_bearing};

use crate::session::{Animation, SessionKind, Tick};

/// Parameters for both orbit modes.
///
/// `radius_degrees: None` rotates the camera in place around its current
/// look-at point (only `bearing` moves). `Some(radius)` revolves the camera
/// around `center` at a fixed planar offset, always facing the center; the
/// planar small-angle approximation makes this suitable only for radii of a
/// few degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitParameters {
    pub center: LngLat,
    /// Signed; negative orbits counter-clockwise.
    pub degrees_per_second: f64,
    /// Held constant in fixed-radius mode; unused when rotating in place.
    pub pitch: f64,
    pub radius_degrees: Option<f64>,
    /// Fixed-radius zoom to hold; `None` holds the zoom found at start.
    pub zoom: Option<f64>,
    /// Whether an early stop rewinds the bearing to its pre-orbit value.
    /// Applies to rotate-in-place only: ambient orbits restore, cinematic
    /// target orbits leave the camera where the interruption found it.
    /// Fixed-radius orbits never restore.
    pub restore_bearing_on_stop: bool,
}

impl OrbitParameters {
    pub fn rotate_in_place(center: LngLat, degrees_per_second: f64) -> Self {
        Self {
            center,
            degrees_per_second,
            pitch: 60.0,
            radius_degrees: None,
            zoom: None,
            restore_bearing_on_stop: false,
        }
    }

    pub fn fixed_radius(
        center: LngLat,
        radius_degrees: f64,
        degrees_per_second: f64,
        pitch: f64,
    ) -> Self {
        Self {
            center,
            degrees_per_second,
            pitch,
            radius_degrees: Some(radius_degrees),
            zoom: None,
            restore_bearing_on_stop: false,
        }
    }

    pub fn restore_on_stop(mut self) -> Self {
        self.restore_bearing_on_stop = true;
        self
    }

    pub fn kind(&self) -> SessionKind {
        if self.radius_degrees.is_some() {
            SessionKind::OrbitAtFixedRadius
        } else {
            SessionKind::Orbit
        }
    }
}

pub(crate) struct OrbitAnimation {
    params: OrbitParameters,
    start_bearing: f64,
    held_zoom: f64,
}

impl OrbitAnimation {
    pub(crate) fn begin(params: OrbitParameters, surface: &mut dyn CameraSurface) -> Self {
        let start_bearing = surface.bearing();
        let held_zoom = params.zoom.unwrap_or_else(|| surface.zoom());
        Self {
            params,
            start_bearing,
            held_zoom,
        }
    }

    fn bearing_at(&self, elapsed_ms: f64) -> f64 {
        wrap_bearing(self.start_bearing + (elapsed_ms / 1000.0) * self.params.degrees_per_second)
    }
}

impl Animation for OrbitAnimation {
    fn update(&mut self, elapsed_ms: f64, surface: &mut dyn CameraSurface) -> Tick {
        let bearing = self.bearing_at(elapsed_ms);
        match self.params.radius_degrees {
            None => surface.set_bearing(bearing),
            Some(radius) => {
                let position = self.params.center.destination(bearing, radius);
                surface.jump_to(CameraMove {
                    center: Some(position),
                    zoom: Some(self.held_zoom),
                    pitch: Some(self.params.pitch),
                    // Face back toward the orbit center.
                    bearing: Some(wrap_bearing(bearing + 180.0)),
                });
            }
        }
        Tick::Continue
    }

    fn complete(&mut self, surface: &mut dyn CameraSurface) {
        if self.params.radius_degrees.is_none() {
            surface.set_bearing(self.start_bearing);
        }
    }

    fn interrupt(&mut self, surface: &mut dyn CameraSurface) {
        if self.params.radius_degrees.is_none() && self.params.restore_bearing_on_stop {
            surface.set_bearing(self.start_bearing);
        }
    }
}
