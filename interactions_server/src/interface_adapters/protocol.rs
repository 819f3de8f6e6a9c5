use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Interaction, MessageReply, Pager, Reply};

const INTERACTION_PING: u64 = 1;
const INTERACTION_APPLICATION_COMMAND: u64 = 2;

const RESPONSE_PONG: u8 = 1;
const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;
const BUTTON_STYLE_PRIMARY: u8 = 1;
const BUTTON_STYLE_SECONDARY: u8 = 2;

// Inbound interaction payload. Only `type` is required; `data` stays untyped so
// its shape never decides whether a request is classified.
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    #[serde(rename = "type")]
    pub kind: u64,
    #[serde(default)]
    pub data: Option<Value>,
}

impl InteractionRequest {
    // `data.name` when it is a string; any other shape reads as no name.
    pub fn command_name(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("name"))
            .and_then(Value::as_str)
    }
}

impl From<InteractionRequest> for Interaction {
    fn from(request: InteractionRequest) -> Self {
        match request.kind {
            INTERACTION_PING => Interaction::Ping,
            INTERACTION_APPLICATION_COMMAND => Interaction::Command {
                name: request.command_name().unwrap_or_default().to_string(),
            },
            kind => Interaction::Unsupported { kind },
        }
    }
}

// Outbound interaction response.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Serialize)]
pub struct MessageData {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
}

#[derive(Debug, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Button>,
}

#[derive(Debug, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: u8,
    pub label: String,
    pub custom_id: String,
}

impl From<Reply> for InteractionResponse {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Pong => InteractionResponse {
                kind: RESPONSE_PONG,
                data: None,
            },
            Reply::Message(message) => InteractionResponse {
                kind: RESPONSE_CHANNEL_MESSAGE,
                data: Some(message.into()),
            },
        }
    }
}

impl From<MessageReply> for MessageData {
    fn from(message: MessageReply) -> Self {
        MessageData {
            content: message.content,
            components: message.pager.map(pager_row).into_iter().collect(),
        }
    }
}

// Previous/Next buttons; the custom ids carry the current page.
fn pager_row(pager: Pager) -> ActionRow {
    ActionRow {
        kind: COMPONENT_ACTION_ROW,
        components: vec![
            Button {
                kind: COMPONENT_BUTTON,
                style: BUTTON_STYLE_SECONDARY,
                label: "Previous".to_string(),
                custom_id: format!("prev_{}", pager.page),
            },
            Button {
                kind: COMPONENT_BUTTON,
                style: BUTTON_STYLE_PRIMARY,
                label: "Next".to_string(),
                custom_id: format!("next_{}", pager.page),
            },
        ],
    }
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
