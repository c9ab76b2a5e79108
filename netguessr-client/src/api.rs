use async_trait::async_trait;
use netguessr_types::{
    CreatePartyRequest, CreatedParty, GuessResult, GuessSubmission, ImageErrorReport,
    JoinPartyQuery, PartyInfo, Subject,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server responded with HTTP {0}")]
    Status(u16),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The HTTP status if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) => Some(*status),
            ApiError::Transport(e) => e.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// The NetGuessr game server, one method per endpoint.
///
/// Party endpoints treat anything but 200 as a refusal and report it as
/// [`ApiError::Status`].
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `GET /celeb/random?format=json`
    async fn random_subject(&self) -> Result<Subject, ApiError>;

    /// `GET /celeb/<name>`, `None` on 404
    async fn lookup_subject(&self, name: &str) -> Result<Option<Subject>, ApiError>;

    /// `POST /game/submit`. The body is decoded whatever the status, since
    /// the server explains refusals (`nogame`) in a regular verdict.
    async fn submit_guess(&self, submission: &GuessSubmission) -> Result<GuessResult, ApiError>;

    /// `GET /game/restart`, response ignored
    async fn restart(&self) -> Result<(), ApiError>;

    /// `POST /manage/imageError`, response ignored
    async fn report_image_error(&self, report: &ImageErrorReport) -> Result<(), ApiError>;

    /// Whether the subject image can be loaded
    async fn image_available(&self, image_url: &str) -> Result<bool, ApiError>;

    /// `GET /game/party/join`
    async fn join_party(&self, query: &JoinPartyQuery) -> Result<(), ApiError>;

    /// `GET /game/party/leave`
    async fn leave_party(&self) -> Result<(), ApiError>;

    /// `POST /game/party/create`
    async fn create_party(&self, request: &CreatePartyRequest) -> Result<CreatedParty, ApiError>;

    /// `GET /game/party/info`, `None` on any non-200
    async fn party_info(&self) -> Result<Option<PartyInfo>, ApiError>;
}
