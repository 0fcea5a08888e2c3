use camera::CameraSurface;
use foundation::time::Time;

/// Identifier of one animation session. Monotonic per director.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Opaque token for the session's registration with the host frame loop.
/// Released exactly once, when the session ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Orbit,
    OrbitAtFixedRadius,
    Flight,
    TargetLock,
    BoxOrbit,
    Custom,
}

/// What a per-frame update asks the scheduler to do next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Done,
}

/// One cinematic mode's per-frame behavior.
///
/// Implementations mutate the surface from `update` and perform their
/// end-of-life camera fixups in `complete` (natural end) or `interrupt`
/// (early stop). The director guarantees at most one animation is live per
/// surface and that neither end hook runs twice.
pub(crate) trait Animation {
    fn update(&mut self, elapsed_ms: f64, surface: &mut dyn CameraSurface) -> Tick;

    fn complete(&mut self, surface: &mut dyn CameraSurface) {
        let _ = surface;
    }

    fn interrupt(&mut self, surface: &mut dyn CameraSurface) {
        let _ = surface;
    }

    /// Whether a stop request may take effect yet (flight's transition
    /// guard window says no for its first half-second).
    fn allows_stop(&self, elapsed_ms: f64) -> bool {
        let _ = elapsed_ms;
        true
    }
}

/// Animation whose camera motion is carried entirely by a parametric
/// surface transition issued at start; the session just waits out its
/// duration. Stopping it cancels the in-flight transition.
pub(crate) struct PassiveAnimation;

impl Animation for PassiveAnimation {
    fn update(&mut self, _elapsed_ms: f64, _surface: &mut dyn CameraSurface) -> Tick {
        Tick::Continue
    }

    fn interrupt(&mut self, surface: &mut dyn CameraSurface) {
        surface.stop_motion();
    }
}

/// Caller-supplied per-frame update, for the generic `start_custom` contract.
pub(crate) struct ClosureAnimation {
    update_fn: Box<dyn FnMut(f64, &mut dyn CameraSurface) -> Tick>,
}

impl ClosureAnimation {
    pub(crate) fn new(update_fn: Box<dyn FnMut(f64, &mut dyn CameraSurface) -> Tick>) -> Self {
        Self { update_fn }
    }
}

impl Animation for ClosureAnimation {
    fn update(&mut self, elapsed_ms: f64, surface: &mut dyn CameraSurface) -> Tick {
        (self.update_fn)(elapsed_ms, surface)
    }
}

/// End-of-life notifications for a session.
#[derive(Default)]
pub struct SessionCallbacks {
    pub(crate) on_complete: Option<Box<dyn FnOnce()>>,
    pub(crate) on_stop: Option<Box<dyn FnOnce()>>,
}

impl SessionCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_stop(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_stop = Some(Box::new(f));
        self
    }
}

/// One running camera animation. Single-use: `running` flips to false once
/// and the session is discarded; restarting means a new session.
pub(crate) struct Session {
    pub(crate) id: SessionId,
    pub(crate) kind: SessionKind,
    pub(crate) started_at: Time,
    pub(crate) duration_ms: Option<f64>,
    pub(crate) running: bool,
    pub(crate) frame_handle: FrameHandle,
    pub(crate) animation: Box<dyn Animation>,
    pub(crate) on_complete: Option<Box<dyn FnOnce()>>,
    pub(crate) on_stop: Option<Box<dyn FnOnce()>>,
}

impl Session {
    pub(crate) fn elapsed_ms(&self, now: Time) -> f64 {
        now.since(self.started_at)
    }

    pub(crate) fn past_duration(&self, now: Time) -> bool {
        self.duration_ms
            .is_some_and(|d| self.elapsed_ms(now) >= d)
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            kind: self.kind,
            started_at: self.started_at,
            duration_ms: self.duration_ms,
            running: self.running,
            frame_handle: self.frame_handle,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("started_at", &self.started_at)
            .field("duration_ms", &self.duration_ms)
            .field("running", &self.running)
            .field("frame_handle", &self.frame_handle)
            .field("animation", &"<dyn Animation>")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

/// Read-only view of a session for hosts and tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub kind: SessionKind,
    pub started_at: Time,
    pub duration_ms: Option<f64>,
    pub running: bool,
    pub frame_handle: FrameHandle,
}

#[cfg(test)]
mod tests {
    use super::{Animation, PassiveAnimation, Session, SessionCallbacks, SessionId, SessionKind};
    use super::{FrameHandle, Tick};
    use camera::{CameraPose, CameraSurface, MemoryCamera};
    use foundation::geo::LngLat;
    use foundation::time::Time;

    fn session(duration_ms: Option<f64>) -> Session {
        Session {
            id: SessionId(1),
            kind: SessionKind::Custom,
            started_at: Time(100.0),
            duration_ms,
            running: true,
            frame_handle: FrameHandle(7),
            animation: Box::new(PassiveAnimation),
            on_complete: None,
            on_stop: None,
        }
    }

    #[test]
    fn elapsed_and_duration_checks() {
        let s = session(Some(1000.0));
        assert_eq!(s.elapsed_ms(Time(600.0)), 500.0);
        assert!(!s.past_duration(Time(1099.0)));
        assert!(s.past_duration(Time(1100.0)));
    }

    #[test]
    fn unlimited_sessions_never_pass_duration() {
        let s = session(None);
        assert!(!s.past_duration(Time(1e12)));
    }

    #[test]
    fn passive_animation_stops_surface_motion_on_interrupt() {
        let mut cam = MemoryCamera::new(CameraPose::new(LngLat::new(0.0, 0.0), 4.0));
        cam.ease_to(camera::EaseTo {
            target: camera::CameraMove {
                zoom: Some(10.0),
                ..Default::default()
            },
            duration_ms: 1000.0,
            easing: foundation::easing::Easing::Linear,
        });
        assert!(cam.is_moving());

        let mut anim = PassiveAnimation;
        assert_eq!(anim.update(0.0, &mut cam), Tick::Continue);
        anim.interrupt(&mut cam);
        assert!(!cam.is_moving());
    }

    #[test]
    fn callbacks_builder_sets_both_hooks() {
        let cb = SessionCallbacks::new().on_complete(|| {}).on_stop(|| {});
        assert!(cb.on_complete.is_some());
        assert!(cb.on_stop.is_some());
    }
}
