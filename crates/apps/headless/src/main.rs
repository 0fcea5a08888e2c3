use std::env;

use camera::{CameraPose, CameraSurface, MemoryCamera};
use cinematics::{CameraTuning, Director, SelectionTarget, TargetLockRequest};
use foundation::geo::LngLat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runtime::frame::Frame;
use runtime::signals::InputSignal;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DT_MS: f64 = 1000.0 / 60.0;

/// Scripted headless drive of the camera director: random flight, a marker
/// selection with its fly-then-orbit sequence, a user interrupt, and the
/// flight home. Runs entirely against the in-memory surface.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tuning = load_tuning();
    let home = tuning.home.clone();

    let mut cam = MemoryCamera::new(CameraPose::new(home.center(), home.zoom));
    let mut director = match Director::new(tuning, &cam) {
        Ok(director) => director,
        Err(err) => {
            warn!("failed to attach director: {err}");
            return;
        }
    };

    let seed = env::var("FLIGHT_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut frame = Frame::new(0, DT_MS);
    let mut run_until = |director: &mut Director, cam: &mut MemoryCamera, until_ms: f64| {
        while frame.now.millis() <= until_ms {
            cam.tick(frame.now);
            director.tick(frame, cam);
            frame = frame.next();
        }
    };

    info!("starting random flight");
    director.start_random_flight(&mut rng, &mut cam);
    run_until(&mut director, &mut cam, 2000.0);
    report_pose("cruising", &cam);

    director.stop(&mut cam);
    run_until(&mut director, &mut cam, 3000.0);
    report_pose("decelerated", &cam);

    info!("selecting a Sydney incident marker");
    director.post_selection(SelectionTarget::new(
        LngLat::new(151.21, -33.87),
        json!({ "type": "ACCIDENT", "subtype": "ACCIDENT_MAJOR", "confidence": 4 }),
    ));
    run_until(&mut director, &mut cam, 8000.0);
    report_pose("orbiting the incident", &cam);

    info!("user input interrupts the orbit");
    director.push_signal(InputSignal::KeyDown);
    run_until(&mut director, &mut cam, 8500.0);

    info!("ambient orbit over the interrupted view");
    director.start_ambient_orbit(&mut cam);
    run_until(&mut director, &mut cam, 9000.0);

    info!("direct target lock on Melbourne");
    let request = TargetLockRequest::approach(LngLat::new(144.96, -37.81), director.tuning());
    director.fly_to_target(request, &mut cam);
    run_until(&mut director, &mut cam, 12_000.0);
    report_pose("locked on Melbourne", &cam);

    info!("flying home");
    director.fly_home(&mut cam);
    run_until(&mut director, &mut cam, 16_000.0);
    report_pose("home", &cam);

    for logged in director.drain_events() {
        info!(at_ms = logged.at.millis(), event = ?logged.event, "event");
    }
    for (name, value) in director.diagnostics().snapshot() {
        info!(counter = name, value, "diagnostics");
    }
    if let Some(mean) = director.diagnostics().session_ms.mean_ms() {
        info!(mean_ms = mean, "mean session lifetime");
    }
}

fn report_pose(label: &str, cam: &MemoryCamera) {
    let pose = cam.pose();
    info!(
        label,
        lng = pose.lng,
        lat = pose.lat,
        zoom = pose.zoom,
        bearing = pose.bearing,
        pitch = pose.pitch,
        "camera"
    );
}

/// Tuning comes from the JSON file named by `CAMERA_TUNING`, falling back to
/// defaults on any problem.
fn load_tuning() -> CameraTuning {
    let Ok(path) = env::var("CAMERA_TUNING") else {
        return CameraTuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(tuning) => tuning,
            Err(err) => {
                warn!("invalid tuning file {path}: {err}");
                CameraTuning::default()
            }
        },
        Err(err) => {
            warn!("failed to read tuning file {path}: {err}");
            CameraTuning::default()
        }
    }
}
