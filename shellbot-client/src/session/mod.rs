mod session;
mod session_event;
mod session_state;

pub use session::*;
pub use session_event::*;
pub use session_state::*;
