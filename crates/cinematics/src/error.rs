/// Setup-ordering failures surfaced at director construction.
///
/// Everything else in this crate fails soft (logged no-ops); attaching to a
/// surface that is not ready is a programming error and stays loud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CinematicsError {
    SurfaceNotReady,
    MissingCapability(&'static str),
}

impl std::fmt::Display for CinematicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CinematicsError::SurfaceNotReady => {
                write!(f, "camera surface has not finished initializing")
            }
            CinematicsError::MissingCapability(cap) => {
                write!(f, "camera surface lacks required capability: {cap}")
            }
        }
    }
}

impl std::error::Error for CinematicsError {}
