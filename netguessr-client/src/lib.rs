pub mod api;
pub mod config;
pub mod http;
pub mod input;
pub mod session_client;
pub mod terminal;

pub use api::{ApiError, GameApi};
pub use http::HttpGameApi;
pub use input::{Prompt, Prompter};
pub use session_client::{
    CreateOutcome, JoinOutcome, LeaveOutcome, SessionClient, SessionError, SessionOptions,
};
