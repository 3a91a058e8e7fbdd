use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of a loaded feed, exactly as the proxy returned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Entry(pub Value);

impl Entry {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProxyRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyResponse {
    pub feed: ProxyFeed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyFeed {
    pub entries: Vec<Entry>,
}
