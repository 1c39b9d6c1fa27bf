mod room_controller;
mod room_handle;

pub use room_controller::*;
pub use room_handle::*;
