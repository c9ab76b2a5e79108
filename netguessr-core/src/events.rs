use netguessr_types::{GuessResult, PartyInfo, Subject};
use std::fmt;

/// Something the player has to be told about, typically a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    HttpError { status: u16 },
    RoomNotFound { code: String },
    PasscodeRequired { code: String },
    JoinFailed { status: u16 },
    CreateFailed { status: u16 },
    LeaveFailed { status: u16 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::HttpError { status } => write!(f, "HTTP-Error: {}", status),
            Notice::RoomNotFound { code } => write!(f, "Room {} does not exist", code),
            Notice::PasscodeRequired { code } => write!(f, "Room {} requires a passcode", code),
            Notice::JoinFailed { status } => write!(f, "Could not join party (HTTP {})", status),
            Notice::CreateFailed { status } => {
                write!(f, "Could not create party (HTTP {})", status)
            }
            Notice::LeaveFailed { status } => write!(f, "Could not leave party (HTTP {})", status),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    SubjectLoaded {
        subject: Subject,
    },
    GuessSubmitted {
        guess: String,
    },
    GuessResolved {
        result: GuessResult,
    },
    GameRestarted,
    ImageErrorReported {
        image_url: String,
        celeb: String,
    },
    PartyCreated {
        room_code: String,
    },
    PartyJoined {
        code: String,
    },
    PartyLeft,
    PartyInfoRefreshed {
        info: Option<PartyInfo>,
    },
    Notice(Notice),
}

/// Event handler trait for reacting to session events
pub trait SessionEventHandler: Send {
    fn handle_event(&mut self, event: SessionEvent);
}

/// Simple event bus for distributing session events
pub struct SessionEventBus {
    handlers: Vec<Box<dyn SessionEventHandler>>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}
