use std::future::Future;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::core::display::RenderPort;
use crate::core::feed::loader::{CompletionCallback, FeedLoader, LoadError};
use crate::core::feed::proxy::FeedProxy;
use crate::core::menu::{MenuController, MenuState};
use crate::core::registry::FeedRegistry;
use crate::core::template::{TemplateError, Templates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    FeedSelected(usize),
    MenuIconClicked,
}

/// Whether the UI should still perform its default action for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("navigation item could not be rendered: {0}")]
    Navigation(#[from] TemplateError),
}

pub struct App<P, D> {
    loader: FeedLoader<P, D>,
    menu: MenuController,
    in_flight: Vec<JoinHandle<()>>,
}

impl<P: FeedProxy, D: RenderPort> App<P, D> {
    /// Draws the feed list and the hidden menu. Nothing is fetched yet.
    pub fn bootstrap(
        registry: FeedRegistry,
        proxy: P,
        mut display: D,
        templates: Templates,
    ) -> Result<Self, AppError> {
        let menu = MenuController::default();
        display.set_menu_hidden(menu.state().is_hidden());
        for feed in registry.iter() {
            let item = templates.nav_item.render(&json!({
                "id": feed.id,
                "name": feed.name,
                "url": feed.url,
            }))?;
            display.append_nav_item(item);
        }
        tracing::debug!(feeds = registry.len(), "navigation rendered");

        let loader = FeedLoader::new(
            Arc::new(registry),
            Arc::new(proxy),
            Arc::new(Mutex::new(display)),
            templates.entry,
        );
        Ok(Self {
            loader,
            menu,
            in_flight: Vec::new(),
        })
    }

    pub fn registry(&self) -> &FeedRegistry {
        self.loader.registry()
    }

    pub fn display(&self) -> &Arc<Mutex<D>> {
        self.loader.display()
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    pub fn load_feed(
        &mut self,
        feed_id: usize,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), AppError> {
        let handle = self.loader.load_feed(feed_id, on_complete)?;
        self.in_flight.retain(|task| !task.is_finished());
        self.in_flight.push(handle);
        Ok(())
    }

    pub fn init(&mut self) -> Result<(), AppError> {
        tracing::info!("feed service ready, loading first feed");
        self.load_feed(0, None)
    }

    pub async fn toggle_menu(&mut self) -> MenuState {
        let state = self.menu.toggle();
        self.display().lock().await.set_menu_hidden(state.is_hidden());
        state
    }

    pub async fn handle(&mut self, event: UiEvent) -> Result<DefaultAction, AppError> {
        match event {
            UiEvent::FeedSelected(feed_id) => {
                let state = self.menu.hide();
                self.display().lock().await.set_menu_hidden(state.is_hidden());
                self.load_feed(feed_id, None)?;
                Ok(DefaultAction::Prevent)
            }
            UiEvent::MenuIconClicked => {
                self.toggle_menu().await;
                Ok(DefaultAction::Allow)
            }
        }
    }

    /// Handles events until the channel closes. `init` runs once, as soon
    /// as `ready` resolves; events are served before and after that.
    pub async fn run<F>(mut self, ready: F, mut events: mpsc::Receiver<UiEvent>) -> Self
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(ready);
        let mut initialized = false;
        loop {
            tokio::select! {
                biased;
                () = &mut ready, if !initialized => {
                    initialized = true;
                    if let Err(error) = self.init() {
                        tracing::warn!(error = %error, "initial load was not started");
                    }
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    if let Err(error) = self.handle(event).await {
                        tracing::warn!(?event, error = %error, "event ignored");
                    }
                }
            }
        }
        self.finish().await;
        self
    }

    /// Waits for every load started so far. Nothing is cancelled.
    pub async fn finish(&mut self) {
        for task in self.in_flight.drain(..) {
            if let Err(error) = task.await {
                tracing::error!(error = %error, "load task panicked");
            }
        }
    }
}
