// Interaction kinds understood by the handler after signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    // Platform liveness check, answered with an acknowledgement only.
    Ping,
    // Slash command invocation; the name is empty when the payload omits it.
    Command { name: String },
    // Any other interaction type the platform may send.
    Unsupported { kind: u64 },
}

// Commands backed by the player-status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCommand {
    Online,
    Recent,
}

impl StatusCommand {
    // Case-insensitive lookup of a command name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "online" => Some(StatusCommand::Online),
            "recent" => Some(StatusCommand::Recent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCommand::Online => "online",
            StatusCommand::Recent => "recent",
        }
    }
}

// Reply produced for a verified interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Pong,
    Message(MessageReply),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReply {
    pub content: String,
    // Present when the content is one page of a longer list.
    pub pager: Option<Pager>,
}

impl MessageReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pager: None,
        }
    }
}

// Zero-based page cursor rendered as Previous/Next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
}
