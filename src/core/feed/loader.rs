use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::proxy::{FeedProxy, FetchError};
use crate::core::display::RenderPort;
use crate::core::registry::FeedRegistry;
use crate::core::template::{Template, TemplateError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("feed {0} is not in the registry")]
    UnknownFeed(usize),
    #[error("feed {feed_id} failed to load: {source}")]
    Fetch {
        feed_id: usize,
        #[source]
        source: FetchError,
    },
    #[error("feed {feed_id} entry could not be rendered: {source}")]
    Render {
        feed_id: usize,
        #[source]
        source: TemplateError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFeed {
    pub feed_id: usize,
    pub name: String,
    pub entry_count: usize,
}

pub type LoadOutcome = Result<LoadedFeed, LoadError>;

pub type CompletionCallback = Box<dyn FnOnce(&LoadOutcome) + Send + 'static>;

/// Fetches a feed through the proxy and swaps it into the display.
///
/// The display only changes when a fetch succeeds, and then title and
/// entries change together. Overlapping loads are not coordinated: the
/// response that lands last is what stays on screen.
pub struct FeedLoader<P, D> {
    registry: Arc<FeedRegistry>,
    proxy: Arc<P>,
    display: Arc<Mutex<D>>,
    entry_template: Arc<Template>,
}

impl<P, D> Clone for FeedLoader<P, D> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            proxy: Arc::clone(&self.proxy),
            display: Arc::clone(&self.display),
            entry_template: Arc::clone(&self.entry_template),
        }
    }
}

impl<P: FeedProxy, D: RenderPort> FeedLoader<P, D> {
    pub fn new(
        registry: Arc<FeedRegistry>,
        proxy: Arc<P>,
        display: Arc<Mutex<D>>,
        entry_template: Template,
    ) -> Self {
        Self {
            registry,
            proxy,
            display,
            entry_template: Arc::new(entry_template),
        }
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    pub fn display(&self) -> &Arc<Mutex<D>> {
        &self.display
    }

    pub async fn load(&self, feed_id: usize) -> LoadOutcome {
        let feed = self
            .registry
            .get(feed_id)
            .ok_or(LoadError::UnknownFeed(feed_id))?;

        tracing::debug!(feed_id, feed_url = %feed.url, "requesting feed");
        let entries = match self.proxy.parse_feed(&feed.url).await {
            Ok(entries) => entries,
            Err(source) => {
                tracing::warn!(feed_id, feed_url = %feed.url, error = %source, "feed load failed");
                return Err(LoadError::Fetch { feed_id, source });
            }
        };

        let rendered = match entries
            .iter()
            .map(|entry| self.entry_template.render(entry.as_value()))
            .collect::<Result<Vec<String>, TemplateError>>()
        {
            Ok(rendered) => rendered,
            Err(source) => {
                tracing::warn!(feed_id, error = %source, "feed entries failed to render");
                return Err(LoadError::Render { feed_id, source });
            }
        };
        let entry_count = rendered.len();
        {
            let mut display = self.display.lock().await;
            display.set_title(&feed.name);
            display.replace_entries(rendered);
        }
        tracing::info!(feed_id, entries = entry_count, "feed rendered");

        Ok(LoadedFeed {
            feed_id,
            name: feed.name.clone(),
            entry_count,
        })
    }

    /// Starts a load in the background and returns at once.
    ///
    /// `on_complete` runs exactly once, after the display update on success
    /// or with the error on failure. An unknown id is rejected up front and
    /// never reaches the callback.
    pub fn load_feed(
        &self,
        feed_id: usize,
        on_complete: Option<CompletionCallback>,
    ) -> Result<JoinHandle<()>, LoadError> {
        if self.registry.get(feed_id).is_none() {
            return Err(LoadError::UnknownFeed(feed_id));
        }

        let loader = self.clone();
        Ok(tokio::spawn(async move {
            let outcome = loader.load(feed_id).await;
            if let Some(callback) = on_complete {
                callback(&outcome);
            }
        }))
    }
}
