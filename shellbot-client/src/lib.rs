mod client;
mod config;
mod error;
pub mod policy;
pub mod room;
pub mod session;
pub mod shell;
pub mod signaling;
pub mod transport;

pub use client::run_client;
pub use config::*;
pub use error::*;
pub use policy::*;
pub use room::*;
pub use session::*;
pub use shell::*;
pub use signaling::*;
pub use transport::*;
