pub mod events;
pub mod feedback;
pub mod party;
pub mod round;
pub mod session;

// Re-export main components
pub use events::*;
pub use feedback::*;
pub use party::*;
pub use round::*;
pub use session::*;
