/// Configuration subsystem - player settings and preferences
///
/// Handles loading settings from .vimdojorc files.
pub mod rc;

pub use rc::{DojoConfig, RcLoader};
