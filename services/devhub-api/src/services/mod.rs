pub mod notes_service;
pub mod refresh;
pub mod state;

pub use notes_service::NotesService;
pub use refresh::RefreshCoordinator;
pub use state::{AppState, Feeds};
