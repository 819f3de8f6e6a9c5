use crate::domain::{Interaction, InteractionError, MessageReply, Reply, StatusCommand};
use crate::use_cases::player_status::PlayerStatusUseCase;

pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command";

// Routes a verified interaction to its reply.
#[derive(Clone)]
pub struct DispatchUseCase {
    pub status: PlayerStatusUseCase,
}

impl DispatchUseCase {
    pub async fn execute(&self, interaction: Interaction) -> Result<Reply, InteractionError> {
        match interaction {
            // Answer liveness checks before touching anything else.
            Interaction::Ping => Ok(Reply::Pong),
            Interaction::Command { name } => Ok(Reply::Message(self.run_command(&name).await)),
            Interaction::Unsupported { kind } => Err(InteractionError::UnsupportedType { kind }),
        }
    }

    async fn run_command(&self, name: &str) -> MessageReply {
        match StatusCommand::parse(name) {
            Some(StatusCommand::Recent) if !self.status.settings.recent_enabled => {
                tracing::debug!(command = name, "recent command disabled");
                MessageReply::text(UNKNOWN_COMMAND_MESSAGE)
            }
            Some(command) => self.status.execute(command).await,
            None => {
                tracing::debug!(command = name, "unknown command");
                MessageReply::text(UNKNOWN_COMMAND_MESSAGE)
            }
        }
    }
}
