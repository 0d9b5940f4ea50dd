use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
