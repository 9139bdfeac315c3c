use serde::{Deserialize, Serialize};

/// A single newsletter email, normalized from Gmail or supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsletter {
    pub subject: String,
    pub sender: String,
    pub content: String,
}

/// Structured digest produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub tldr: Vec<String>,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub items: Vec<TopicItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicItem {
    pub headline: String,
    pub source: String,
}

/// Body of `POST /summarize` and of the `GET /grab-newsletters` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsletterBatch {
    pub newsletters: Vec<Newsletter>,
}
