pub mod api_error;
pub mod feed_error;
pub mod fetch_error;

pub use api_error::ApiError;
pub use feed_error::FeedError;
pub use fetch_error::FetchError;
