mod connection_wrapper;
mod mesh_command;
mod peer_channels;
mod peer_context;
mod peer_mesh;
mod transport_config;
mod transport_event;

pub use connection_wrapper::*;
pub use mesh_command::*;
pub use peer_channels::*;
pub use peer_context::*;
pub use peer_mesh::*;
pub use transport_config::*;
pub use transport_event::*;
