use async_trait::async_trait;
use std::fmt;

use netguessr_types::{CreatePartyRequest, JoinPartyQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    RoomCode,
    Username,
    /// `creating` is true when choosing the passcode of a new room, false
    /// when the server asked for the passcode of an existing one.
    Passcode { creating: bool },
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::RoomCode => f.write_str("Room code"),
            Prompt::Username => f.write_str("Username"),
            Prompt::Passcode { creating: true } => {
                f.write_str("Passcode (leave empty for a public room)")
            }
            Prompt::Passcode { creating: false } => f.write_str("This room needs a passcode"),
        }
    }
}

/// Collects a single value from the player. `None` means they cancelled.
#[async_trait]
pub trait Prompter: Send {
    async fn prompt(&mut self, prompt: Prompt) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub code: String,
    pub username: String,
}

impl JoinRequest {
    pub fn to_query(&self, passcode: Option<String>) -> JoinPartyQuery {
        JoinPartyQuery {
            code: self.code.clone(),
            username: self.username.clone(),
            passcode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub username: String,
    pub passcode: Option<String>,
}

impl From<CreateRequest> for CreatePartyRequest {
    fn from(request: CreateRequest) -> Self {
        CreatePartyRequest {
            passcode: request.passcode,
            username: request.username,
        }
    }
}

async fn prompt_required(prompter: &mut dyn Prompter, prompt: Prompt) -> Option<String> {
    let value = prompter.prompt(prompt).await?;
    let value = value.trim();
    if value.is_empty() {
        tracing::info!("{} left empty, aborting", prompt);
        return None;
    }
    Some(value.to_string())
}

/// Ask for a room code and username. Either one cancelled or empty aborts
/// the join before anything is sent.
pub async fn collect_join_request(prompter: &mut dyn Prompter) -> Option<JoinRequest> {
    let code = prompt_required(prompter, Prompt::RoomCode).await?;
    let username = prompt_required(prompter, Prompt::Username).await?;
    Some(JoinRequest { code, username })
}

/// Ask for a username and an optional passcode. An empty passcode makes a
/// public room; a cancelled passcode prompt aborts.
pub async fn collect_create_request(prompter: &mut dyn Prompter) -> Option<CreateRequest> {
    let username = prompt_required(prompter, Prompt::Username).await?;

    let Some(passcode) = prompter.prompt(Prompt::Passcode { creating: true }).await else {
        tracing::info!("Passcode prompt cancelled, aborting party creation");
        return None;
    };

    let passcode = passcode.trim();
    Some(CreateRequest {
        username,
        passcode: (!passcode.is_empty()).then(|| passcode.to_string()),
    })
}
