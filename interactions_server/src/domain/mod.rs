// Domain layer: interaction and player types plus the ports use cases depend on.

pub mod errors;
pub mod interaction;
pub mod player;
pub mod ports;

pub use errors::InteractionError;
pub use interaction::{Interaction, MessageReply, Pager, Reply, StatusCommand};
pub use player::{LastLogin, PlayerRecord, UNKNOWN_PLAYER_NAME};
pub use ports::{Clock, PlayerSource};
