use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Subject;

/// How close a guess landed, as judged by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StatCode {
    OnTheMoney,
    CloseEnough,
    Middle,
    Off,
    WayOff,
    /// Sent with a 400 when the server session holds no subject.
    NoGame,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessResult {
    pub statcode: StatCode,
    pub message: String,
    #[serde(default)]
    pub celeb_data: Option<Subject>,
    #[serde(default)]
    pub score: Option<i32>,
}
