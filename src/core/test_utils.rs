use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::core::feed::proxy::{FeedProxy, FetchError};
use crate::core::feed::types::Entry;
use crate::core::registry::{FeedRegistry, FeedSeed};

/// Canned proxy: known urls answer with their entries, anything else fails with 503.
#[derive(Default)]
pub struct StubProxy {
    responses: HashMap<String, Vec<Value>>,
    delays: HashMap<String, Duration>,
    calls: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StubProxy {
    pub fn respond(mut self, url: &str, entries: Vec<Value>) -> Self {
        self.responses.insert(url.to_string(), entries);
        self
    }

    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn requested_urls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requested)
    }
}

impl FeedProxy for StubProxy {
    async fn parse_feed(&self, feed_url: &str) -> Result<Vec<Entry>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("lock must not be poisoned")
            .push(feed_url.to_string());
        if let Some(delay) = self.delays.get(feed_url) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(feed_url) {
            Some(entries) => Ok(entries.iter().cloned().map(Entry).collect()),
            None => Err(FetchError::HttpStatus(503)),
        }
    }
}

pub fn two_feed_registry() -> FeedRegistry {
    FeedRegistry::from_seeds(vec![
        FeedSeed::new("A", "http://a"),
        FeedSeed::new("B", "http://b"),
    ])
    .expect("seeds are valid")
}
