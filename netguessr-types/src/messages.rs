use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /game/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessSubmission {
    pub guess: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess_amt: Option<f64>,
}

/// Body of `POST /manage/imageError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageErrorReport {
    pub image_url: String,
    pub celeb: String,
}

/// Query string of `GET /game/party/join`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JoinPartyQuery {
    pub code: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
}

/// Body of `POST /game/party/create`. No passcode means a public room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatePartyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    pub username: String,
}
