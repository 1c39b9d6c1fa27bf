mod shell_bridge;
mod shell_process;

pub use shell_bridge::*;
pub use shell_process::*;
