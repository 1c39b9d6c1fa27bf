mod channel;
mod peer;
mod policy;
mod role;
mod room;
mod shell;
mod signaling;

pub use channel::{ChannelId, ChannelPacket};
pub use peer::PeerId;
pub use policy::{ChannelPolicy, MediaDirection, Participant, Party, PolicyRule};
pub use role::ParticipantRole;
pub use room::{JoinOptions, RobotJoin, RoomId};
pub use shell::ShellMessage;
pub use signaling::{ExchangePayload, IceServerConfig, SignalMessage};
