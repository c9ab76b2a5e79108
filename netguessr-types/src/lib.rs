pub mod guess;
pub mod messages;
pub mod party;
pub mod subject;

// Re-export all types
pub use guess::*;
pub use messages::*;
pub use party::*;
pub use subject::*;
