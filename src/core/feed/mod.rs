pub mod loader;
pub mod proxy;
pub mod types;
