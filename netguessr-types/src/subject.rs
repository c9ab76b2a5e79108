use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A celebrity whose net worth is being guessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subject {
    pub name: String,
    // The copy echoed back inside a guess verdict may leave this out
    #[serde(default)]
    pub image: String,
    pub networth: NetWorth,
}

/// Net worth exactly as the server sent it.
///
/// Older celebrity records store a formatted string such as `"$5,000,000"`,
/// newer ones a plain number. Both are displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum NetWorth {
    Number(f64),
    Text(String),
}

impl fmt::Display for NetWorth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetWorth::Number(value) => write!(f, "{}", value),
            NetWorth::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for NetWorth {
    fn from(value: f64) -> Self {
        NetWorth::Number(value)
    }
}

impl From<&str> for NetWorth {
    fn from(value: &str) -> Self {
        NetWorth::Text(value.to_string())
    }
}
