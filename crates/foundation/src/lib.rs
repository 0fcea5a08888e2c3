pub mod easing;
pub mod geo;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use easing::*;
pub use geo::*;
pub use time::*;
