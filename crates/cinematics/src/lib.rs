pub mod bridge;
pub mod config;
pub mod director;
pub mod error;
pub mod events;
pub mod flight;
pub mod interrupt;
pub mod orbit;
pub mod session;
pub mod target_lock;

pub use bridge::*;
pub use config::*;
pub use director::*;
pub use error::*;
pub use events::*;
pub use flight::*;
pub use interrupt::*;
pub use orbit::*;
pub use session::*;
pub use target_lock::*;
