pub mod feed_handler;
pub mod health;
pub mod identity;
pub mod notes_handler;

pub use feed_handler::*;
pub use health::*;
pub use identity::UserEmail;
pub use notes_handler::*;
