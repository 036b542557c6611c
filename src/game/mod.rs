/// Game subsystem - session state and the interactive terminal loop
pub mod keymap;
pub mod runner;
pub mod session;

pub use runner::Runner;
pub use session::GameSession;
