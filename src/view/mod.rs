/// View subsystem - terminal rendering for the practice screen
pub mod renderer;

pub use renderer::{RenderParams, View};
