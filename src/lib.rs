pub mod core;

pub use crate::core::app::{App, AppError, DefaultAction, UiEvent};
pub use crate::core::config::{AppConfig, ConfigError};
pub use crate::core::display::{MemoryDisplay, RenderPort, TerminalDisplay};
pub use crate::core::feed::loader::{CompletionCallback, FeedLoader, LoadError, LoadOutcome, LoadedFeed};
pub use crate::core::feed::proxy::{FeedProxy, FetchError, HttpFeedProxy};
pub use crate::core::menu::{MenuController, MenuState};
pub use crate::core::registry::{FeedDescriptor, FeedRegistry, FeedSeed, RegistryError};
pub use crate::core::template::{Template, TemplateError, Templates};
