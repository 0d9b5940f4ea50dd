pub mod hackathon;
pub mod news;
pub mod note;

pub use hackathon::*;
pub use news::*;
pub use note::*;

/// The three cached upstream feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Hackathons,
    News,
    Contests,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Hackathons => "hackathons",
            Feed::News => "news",
            Feed::Contests => "contests",
        }
    }
}
