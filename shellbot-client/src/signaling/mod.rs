mod signaling_commands;
mod supervisor;
mod ws_connector;

pub use signaling_commands::*;
pub use supervisor::*;
pub use ws_connector::*;
