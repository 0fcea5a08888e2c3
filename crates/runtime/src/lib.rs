pub mod diagnostics;
pub mod frame;
pub mod signals;
pub mod timers;

pub use diagnostics::*;
pub use frame::*;
pub use signals::*;
pub use timers::*;
