use camera::{CameraMove, CameraSurface, EaseTo, FlyTo};
use foundation::easing::Easing;
use foundation::geo::{GeoBounds, LngLat};
use foundation::time::Time;
use rand::Rng;
use runtime::diagnostics::Diagnostics;
use runtime::frame::Frame;
use runtime::signals::{InputSignal, SignalQueue};
use runtime::timers::{TimerId, TimerQueue};

use crate::bridge::{SelectionMailbox, SelectionTarget};
use crate::config::CameraTuning;
use crate::error::CinematicsError;
use crate::events::{CinematicEvent, EventLog, LoggedEvent};
use crate::flight::{FlightAnimation, FlightParameters};
use crate::interrupt::InterruptCoordinator;
use crate::orbit::{OrbitAnimation, OrbitParameters};
use crate::session::{
    Animation, ClosureAnimation, FrameHandle, PassiveAnimation, Session, SessionCallbacks,
    SessionId, SessionKind, SessionSnapshot, Tick,
};
use crate::target_lock::{
    OrbitStyle, StageEvent, TargetLockRequest, TargetSequence, fly_duration_ms,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum StopOutcome {
    Stopped,
    GuardHeld,
    NoSession,
}

/// Owns every piece of mutable animation state for one camera surface and
/// drives it from the host render loop.
///
/// Per-tick order: interaction signals, then the selection mailbox, then due
/// sequence stages, then one update of the active session. At most one
/// session is ever live; `start_*` calls arriving while one is active are
/// rejected (logged, evented, no-op). Only the target-lock, selection, and
/// fly-home flows preempt.
#[derive(Debug)]
pub struct Director {
    tuning: CameraTuning,
    clock: Time,
    next_session_id: u64,
    next_frame_handle: u64,
    active: Option<Session>,
    timers: TimerQueue<StageEvent>,
    sequence: Option<TargetSequence>,
    flyover_return: Option<TimerId>,
    interrupts: InterruptCoordinator,
    signals: SignalQueue,
    mailbox: SelectionMailbox,
    highlighted: bool,
    events: EventLog,
    diag: Diagnostics,
}

impl Director {
    /// Fails loudly if the surface is attached out of order: every other
    /// failure in this module is a soft no-op, but a missing surface is a
    /// setup bug.
    pub fn new(
        tuning: CameraTuning,
        surface: &dyn CameraSurface,
    ) -> Result<Self, CinematicsError> {
        if !surface.is_ready() {
            return Err(CinematicsError::SurfaceNotReady);
        }
        if !surface.capabilities().parametric_motion {
            return Err(CinematicsError::MissingCapability("parametric_motion"));
        }
        Ok(Self {
            tuning,
            clock: Time::ZERO,
            next_session_id: 0,
            next_frame_handle: 0,
            active: None,
            timers: TimerQueue::new(),
            sequence: None,
            flyover_return: None,
            interrupts: InterruptCoordinator::new(),
            signals: SignalQueue::new(),
            mailbox: SelectionMailbox::new(),
            highlighted: false,
            events: EventLog::new(),
            diag: Diagnostics::new(),
        })
    }

    // ------------------------------------------------------------------
    // Host entry points
    // ------------------------------------------------------------------

    /// Advances the whole animation state by one render frame.
    pub fn tick(&mut self, frame: Frame, surface: &mut dyn CameraSurface) {
        self.clock = frame.now;

        for signal in self.signals.drain() {
            self.handle_signal(signal, surface);
        }

        if let Some(target) = self.mailbox.take() {
            self.handle_selection(target, surface);
        }

        while let Some((timer_id, stage)) = self.timers.pop_due(frame.now) {
            self.handle_stage(timer_id, stage, surface);
        }

        self.advance_active(frame, surface);
    }

    pub fn push_signal(&mut self, signal: InputSignal) {
        self.signals.push(signal);
    }

    /// Hands a picked entity to the selection bridge. Returns `true` if an
    /// undelivered previous pick was replaced.
    pub fn post_selection(&mut self, target: SelectionTarget) -> bool {
        self.mailbox.post(target)
    }

    // ------------------------------------------------------------------
    // Engine starts
    // ------------------------------------------------------------------

    pub fn start_orbit(
        &mut self,
        params: OrbitParameters,
        duration_ms: Option<f64>,
        callbacks: SessionCallbacks,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(params.kind());
        }
        let animation = OrbitAnimation::begin(params, surface);
        Some(self.begin_session(params.kind(), duration_ms, Box::new(animation), callbacks))
    }

    /// Continuous rotate-in-place orbit around the current view; runs until
    /// stopped and rewinds the bearing when it is.
    pub fn start_ambient_orbit(&mut self, surface: &mut dyn CameraSurface) -> Option<SessionId> {
        let params = OrbitParameters::rotate_in_place(
            surface.center(),
            self.tuning.ambient.degrees_per_second,
        )
        .restore_on_stop();
        self.start_orbit(params, None, SessionCallbacks::default(), surface)
    }

    pub fn start_flight(
        &mut self,
        params: FlightParameters,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::Flight);
        }
        tracing::debug!(heading = params.heading_degrees, "flight started");
        let animation = FlightAnimation::begin(params, &self.tuning.flight, surface);
        Some(self.begin_session(
            SessionKind::Flight,
            None,
            Box::new(animation),
            SessionCallbacks::default(),
        ))
    }

    pub fn start_random_flight<R: Rng>(
        &mut self,
        rng: &mut R,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        let params = FlightParameters::random(rng, &self.tuning.flight);
        self.start_flight(params, surface)
    }

    /// Generic session contract: `update(elapsed_ms)` runs once per frame
    /// until it returns [`Tick::Done`], the duration elapses, or the session
    /// is stopped.
    pub fn start_custom(
        &mut self,
        duration_ms: Option<f64>,
        update: impl FnMut(f64, &mut dyn CameraSurface) -> Tick + 'static,
        callbacks: SessionCallbacks,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::Custom);
        }
        let animation = ClosureAnimation::new(Box::new(update));
        Some(self.begin_session(SessionKind::Custom, duration_ms, Box::new(animation), callbacks))
    }

    // ------------------------------------------------------------------
    // Target lock and selection
    // ------------------------------------------------------------------

    /// Fly-then-orbit. Unlike the `start_*` family this preempts whatever
    /// is running: the sequence starts by stopping any active session.
    pub fn fly_to_target(
        &mut self,
        request: TargetLockRequest,
        surface: &mut dyn CameraSurface,
    ) -> SessionId {
        self.preempt(surface);
        self.begin_target_lock(request, surface)
    }

    /// Selection-box flow: fly above the box, interruptible from the first
    /// frame by any user input.
    pub fn orbit_to_box(
        &mut self,
        bounds: GeoBounds,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::BoxOrbit);
        }
        let fly_ms = self.tuning.box_orbit.fly_ms;
        let (center, zoom, pitch) = box_view(bounds);
        tracing::debug!(
            lng = center.lng,
            lat = center.lat,
            zoom,
            pitch,
            "box selection approach"
        );
        surface.ease_to(EaseTo {
            target: CameraMove {
                center: Some(center),
                zoom: Some(zoom),
                pitch: Some(pitch),
                bearing: Some(0.0),
            },
            duration_ms: fly_ms,
            easing: Easing::EaseInOutCubic,
        });
        let id = self.begin_session(
            SessionKind::BoxOrbit,
            Some(fly_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        );
        self.interrupts.arm(id);
        Some(id)
    }

    /// Stops everything and flies back to the configured wide view.
    pub fn fly_home(&mut self, surface: &mut dyn CameraSurface) -> SessionId {
        self.preempt(surface);
        let home = self.tuning.home.clone();
        surface.fly_to(FlyTo {
            target: CameraMove {
                center: Some(home.center()),
                zoom: Some(home.zoom),
                pitch: Some(home.pitch),
                bearing: Some(home.bearing),
            },
            duration_ms: home.fly_ms,
        });
        self.begin_session(
            SessionKind::Custom,
            Some(home.fly_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        )
    }

    /// Clears the highlight and winds down the selection's cinematic, if
    /// one is still running. Other sessions are left alone.
    pub fn clear_selection(&mut self, surface: &mut dyn CameraSurface) {
        if self.highlighted {
            self.highlighted = false;
            self.events.emit(self.clock, CinematicEvent::HighlightCleared);
        }
        let sequence_sessions = self
            .sequence
            .as_ref()
            .map(|s| (s.fly_session, s.orbit_session));
        if let Some((fly, orbit)) = sequence_sessions {
            let active_belongs = self
                .active
                .as_ref()
                .is_some_and(|a| a.id == fly || Some(a.id) == orbit);
            self.interrupts.disarm();
            self.retract_sequence();
            if active_belongs {
                self.stop_active_session(surface, true);
            }
        }
    }

    // ------------------------------------------------------------------
    // One-shot eased moves
    // ------------------------------------------------------------------

    pub fn rotate_to(
        &mut self,
        bearing_deg: f64,
        duration_ms: f64,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::Custom);
        }
        surface.ease_to(EaseTo {
            target: CameraMove {
                bearing: Some(bearing_deg),
                ..CameraMove::default()
            },
            duration_ms,
            easing: Easing::EaseOutQuad,
        });
        Some(self.begin_session(
            SessionKind::Custom,
            Some(duration_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        ))
    }

    pub fn pitch_to(
        &mut self,
        pitch_deg: f64,
        duration_ms: f64,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::Custom);
        }
        surface.ease_to(EaseTo {
            target: CameraMove {
                pitch: Some(pitch_deg),
                ..CameraMove::default()
            },
            duration_ms,
            easing: Easing::EaseOutQuad,
        });
        Some(self.begin_session(
            SessionKind::Custom,
            Some(duration_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        ))
    }

    /// Dip toward the current center for 60% of the duration, then ease
    /// back out to the starting pose for the remaining 40%.
    pub fn flyover(
        &mut self,
        target_zoom: f64,
        target_pitch: f64,
        duration_ms: f64,
        surface: &mut dyn CameraSurface,
    ) -> Option<SessionId> {
        if self.is_animating() {
            return self.reject(SessionKind::Custom);
        }
        let start = surface.pose();
        let approach_ms = duration_ms * 0.6;
        let return_ms = duration_ms * 0.4;
        surface.fly_to(FlyTo {
            target: CameraMove {
                center: Some(start.center()),
                zoom: Some(target_zoom),
                pitch: Some(target_pitch),
                bearing: Some(start.bearing),
            },
            duration_ms: approach_ms,
        });
        let id = self.begin_session(
            SessionKind::Custom,
            Some(duration_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        );
        self.flyover_return = Some(self.timers.schedule_in(
            self.clock,
            approach_ms,
            StageEvent::FlyoverReturn {
                pose: start,
                return_ms,
            },
        ));
        Some(id)
    }

    // ------------------------------------------------------------------
    // Stopping
    // ------------------------------------------------------------------

    /// Stops the active session and retracts any pending sequence stages.
    /// Idempotent; a flight still inside its transition guard stays up.
    pub fn stop(&mut self, surface: &mut dyn CameraSurface) {
        self.interrupts.disarm();
        self.retract_sequence();
        if self.stop_active_session(surface, false) == StopOutcome::NoSession {
            surface.stop_motion();
        }
    }

    /// Stops `id` if it is the active session. Calling this for a session
    /// that already ended is a no-op returning `false`.
    pub fn stop_session(&mut self, id: SessionId, surface: &mut dyn CameraSurface) -> bool {
        if self.active.as_ref().is_some_and(|s| s.id == id) {
            self.stop_active_session(surface, false) == StopOutcome::Stopped
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<SessionSnapshot> {
        self.active.as_ref().map(Session::snapshot)
    }

    pub fn armed_session(&self) -> Option<SessionId> {
        self.interrupts.armed()
    }

    pub fn events(&self) -> &[LoggedEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn tuning(&self) -> &CameraTuning {
        &self.tuning
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn begin_session(
        &mut self,
        kind: SessionKind,
        duration_ms: Option<f64>,
        animation: Box<dyn Animation>,
        callbacks: SessionCallbacks,
    ) -> SessionId {
        let id = SessionId(self.next_session_id);
        self.next_session_id += 1;
        let frame_handle = FrameHandle(self.next_frame_handle);
        self.next_frame_handle += 1;

        self.active = Some(Session {
            id,
            kind,
            started_at: self.clock,
            duration_ms,
            running: true,
            frame_handle,
            animation,
            on_complete: callbacks.on_complete,
            on_stop: callbacks.on_stop,
        });
        self.diag.sessions_started += 1;
        self.events
            .emit(self.clock, CinematicEvent::SessionStarted { id, kind });
        tracing::debug!(id = id.0, ?kind, "session started");
        id
    }

    fn reject(&mut self, kind: SessionKind) -> Option<SessionId> {
        tracing::warn!(?kind, "animation already in progress; start rejected");
        self.diag.sessions_rejected += 1;
        self.events
            .emit(self.clock, CinematicEvent::SessionRejected { kind });
        None
    }

    fn stop_active_session(
        &mut self,
        surface: &mut dyn CameraSurface,
        force: bool,
    ) -> StopOutcome {
        let Some(mut session) = self.active.take() else {
            return StopOutcome::NoSession;
        };
        let elapsed = self.clock.since(session.started_at);
        if !force && !session.animation.allows_stop(elapsed) {
            tracing::debug!(id = session.id.0, "stop ignored during transition guard");
            self.active = Some(session);
            return StopOutcome::GuardHeld;
        }

        session.running = false;
        session.animation.interrupt(surface);
        if let Some(callback) = session.on_stop.take() {
            callback();
        }
        self.diag.sessions_stopped += 1;
        self.diag.session_ms.record(elapsed.max(0.0));
        self.events.emit(
            self.clock,
            CinematicEvent::SessionStopped {
                id: session.id,
                kind: session.kind,
            },
        );
        tracing::debug!(id = session.id.0, kind = ?session.kind, "session stopped");
        self.on_session_ended(session.id);
        StopOutcome::Stopped
    }

    fn complete_active_session(&mut self, surface: &mut dyn CameraSurface) {
        let Some(mut session) = self.active.take() else {
            return;
        };
        let elapsed = self.clock.since(session.started_at);
        session.running = false;
        session.animation.complete(surface);
        if let Some(callback) = session.on_complete.take() {
            callback();
        }
        self.diag.sessions_completed += 1;
        self.diag.session_ms.record(elapsed.max(0.0));
        self.events.emit(
            self.clock,
            CinematicEvent::SessionCompleted {
                id: session.id,
                kind: session.kind,
            },
        );
        tracing::debug!(id = session.id.0, kind = ?session.kind, "session completed");
        self.on_session_ended(session.id);
    }

    /// Post-session bookkeeping shared by both end-of-life paths.
    fn on_session_ended(&mut self, id: SessionId) {
        if self.interrupts.armed() == Some(id) {
            self.interrupts.disarm();
        }
        if let Some(timer) = self.flyover_return.take() {
            self.timers.cancel(timer);
        }
        if self
            .sequence
            .as_ref()
            .is_some_and(|seq| seq.orbit_session == Some(id))
        {
            // The orbit phase is over; retract whatever stages are left.
            self.retract_sequence();
        }
    }

    /// Cancels every not-yet-fired stage of the live sequence.
    fn retract_sequence(&mut self) {
        let Some(sequence) = self.sequence.take() else {
            return;
        };
        for timer in sequence.timers {
            self.timers.cancel(timer);
        }
        if sequence.crosshair_active {
            self.events.emit(self.clock, CinematicEvent::CrosshairRemoved);
        }
    }

    /// The target-lock and fly-home flows stop whatever is running first.
    fn preempt(&mut self, surface: &mut dyn CameraSurface) {
        self.interrupts.disarm();
        self.retract_sequence();
        if self.stop_active_session(surface, true) == StopOutcome::NoSession {
            surface.stop_motion();
        }
    }

    fn handle_signal(&mut self, signal: InputSignal, surface: &mut dyn CameraSurface) {
        let Some(id) = self.interrupts.on_signal(signal) else {
            return;
        };
        // The armed session may have completed naturally in the meantime;
        // never deliver a second end-of-life callback.
        if self.active.as_ref().is_some_and(|s| s.id == id && s.running) {
            tracing::debug!(?signal, id = id.0, "user input interrupted the active session");
            self.diag.interrupts_fired += 1;
            self.stop_active_session(surface, false);
        }
    }

    fn handle_selection(&mut self, target: SelectionTarget, surface: &mut dyn CameraSurface) {
        self.diag.selections_consumed += 1;
        tracing::debug!(
            lng = target.coordinate.lng,
            lat = target.coordinate.lat,
            "selection received"
        );
        // Selection is exclusive: a new pick always preempts the previous
        // cinematic and its highlight.
        self.preempt(surface);
        if self.highlighted {
            self.events.emit(self.clock, CinematicEvent::HighlightCleared);
        }
        self.highlighted = true;
        self.events.emit(
            self.clock,
            CinematicEvent::HighlightSet {
                properties: target.properties,
            },
        );

        let request = TargetLockRequest {
            target: target.coordinate,
            zoom: surface.zoom().max(self.tuning.selection.min_zoom),
            pitch: self.tuning.selection.pitch,
            bearing: None,
            fly_duration_ms: None,
            orbit: OrbitStyle::RotateInPlace,
        };
        self.begin_target_lock(request, surface);
    }

    fn begin_target_lock(
        &mut self,
        request: TargetLockRequest,
        surface: &mut dyn CameraSurface,
    ) -> SessionId {
        let targeting = self.tuning.targeting.clone();
        let distance = surface.center().planar_distance(request.target);
        let fly_ms = request
            .fly_duration_ms
            .unwrap_or_else(|| fly_duration_ms(distance, &targeting));

        self.events.emit(
            self.clock,
            CinematicEvent::CrosshairPlaced { at: request.target },
        );
        surface.fly_to(FlyTo {
            target: CameraMove {
                center: Some(request.target),
                zoom: Some(request.zoom),
                pitch: Some(request.pitch),
                bearing: request.bearing,
            },
            duration_ms: fly_ms,
        });
        let fly_session = self.begin_session(
            SessionKind::TargetLock,
            Some(fly_ms),
            Box::new(PassiveAnimation),
            SessionCallbacks::default(),
        );

        let orbit_params = match request.orbit {
            OrbitStyle::RotateInPlace => OrbitParameters {
                center: request.target,
                degrees_per_second: targeting.orbit_degrees_per_second,
                pitch: request.pitch,
                radius_degrees: None,
                zoom: None,
                restore_bearing_on_stop: false,
            },
            OrbitStyle::FixedRadius { radius_degrees } => OrbitParameters {
                center: request.target,
                degrees_per_second: targeting.orbit_degrees_per_second,
                pitch: request.pitch,
                radius_degrees: Some(radius_degrees),
                zoom: None,
                restore_bearing_on_stop: false,
            },
        };

        let timers = vec![
            self.timers.schedule_in(
                self.clock,
                fly_ms + targeting.orbit_start_buffer_ms,
                StageEvent::SequenceOrbitStart,
            ),
            self.timers.schedule_in(
                self.clock,
                targeting.crosshair_fade_start_ms,
                StageEvent::CrosshairFade,
            ),
            self.timers.schedule_in(
                self.clock,
                targeting.crosshair_fade_start_ms + targeting.crosshair_fade_ms,
                StageEvent::CrosshairRemove,
            ),
        ];
        self.sequence = Some(TargetSequence {
            orbit_params,
            orbit_duration_ms: targeting.orbit_duration_ms,
            fly_session,
            orbit_session: None,
            timers,
            crosshair_active: true,
        });
        fly_session
    }

    fn handle_stage(
        &mut self,
        timer_id: TimerId,
        stage: StageEvent,
        surface: &mut dyn CameraSurface,
    ) {
        match stage {
            StageEvent::SequenceOrbitStart => self.start_sequence_orbit(timer_id, surface),
            StageEvent::CrosshairFade => {
                if let Some(sequence) = self.sequence.as_mut() {
                    sequence.timers.retain(|t| *t != timer_id);
                    if sequence.crosshair_active {
                        self.events
                            .emit(self.clock, CinematicEvent::CrosshairFadeStarted);
                    }
                }
            }
            StageEvent::CrosshairRemove => {
                if let Some(sequence) = self.sequence.as_mut() {
                    sequence.timers.retain(|t| *t != timer_id);
                    if sequence.crosshair_active {
                        sequence.crosshair_active = false;
                        self.events.emit(self.clock, CinematicEvent::CrosshairRemoved);
                    }
                }
            }
            StageEvent::FlyoverReturn { pose, return_ms } => {
                self.flyover_return = None;
                surface.ease_to(EaseTo {
                    target: CameraMove {
                        center: Some(pose.center()),
                        zoom: Some(pose.zoom),
                        pitch: Some(pose.pitch),
                        bearing: Some(pose.bearing),
                    },
                    duration_ms: return_ms,
                    easing: Easing::Linear,
                });
            }
        }
    }

    fn start_sequence_orbit(&mut self, timer_id: TimerId, surface: &mut dyn CameraSurface) {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };
        sequence.timers.retain(|t| *t != timer_id);
        let fly_session = sequence.fly_session;
        let params = sequence.orbit_params;
        let duration_ms = sequence.orbit_duration_ms;

        if let Some(active) = self.active.as_ref() {
            if active.id == fly_session {
                // One long frame swallowed both the arrival and the buffer;
                // the fly-in is past due, close it out now.
                self.complete_active_session(surface);
            } else {
                tracing::warn!("orbit stage fired while an unrelated session is active");
                return;
            }
        }

        let animation = OrbitAnimation::begin(params, surface);
        let id = self.begin_session(
            params.kind(),
            Some(duration_ms),
            Box::new(animation),
            SessionCallbacks::default(),
        );
        if let Some(sequence) = self.sequence.as_mut() {
            sequence.orbit_session = Some(id);
        }
        // Only the orbit phase is interruptible; the fly-in ran unarmed.
        self.interrupts.arm(id);
    }

    fn advance_active(&mut self, frame: Frame, surface: &mut dyn CameraSurface) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        if session.past_duration(frame.now) {
            self.complete_active_session(surface);
            return;
        }
        let elapsed = session.elapsed_ms(frame.now);
        let tick = session.animation.update(elapsed, surface);
        if tick == Tick::Done {
            self.complete_active_session(surface);
        }
    }
}

/// View parameters for a drawn selection box: wider boxes zoom out further
/// and tilt harder for effect.
fn box_view(bounds: GeoBounds) -> (LngLat, f64, f64) {
    let max_delta = bounds.max_delta();
    // 110 ≈ km per degree at the equator.
    let zoom = (18.0 - (max_delta * 110.0).log2()).clamp(2.0, 18.0);
    let pitch = (50.0 + (max_delta + 1.0).log2() * 5.0).min(85.0);
    (bounds.center(), zoom, pitch)
}
