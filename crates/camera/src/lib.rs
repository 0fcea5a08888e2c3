pub mod memory;
pub mod pose;
pub mod surface;

pub use memory::*;
pub use pose::*;
pub use surface::*;
