pub mod notes_repo;

#[cfg(test)]
pub mod memory;

pub use notes_repo::{NotesRepository, PgNotesRepo};
