use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Response of `POST /game/party/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedParty {
    pub room_code: String,
}

/// Response of `GET /game/party/info` for a player who is in a party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartyInfo {
    pub stats: BTreeMap<String, i32>, // username -> score
    pub current_user: String,
    pub code: String,
}
