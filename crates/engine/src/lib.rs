pub mod messages;
pub mod prompts;
pub mod session;
pub mod turns;

pub use messages::{Conversation, Message, Sender};
pub use session::IntakeSession;
pub use turns::{classify, next_field, TurnAction, ELICITATION_ORDER};
