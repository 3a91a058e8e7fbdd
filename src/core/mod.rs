pub mod app;
pub mod config;
pub mod display;
pub mod feed;
pub mod menu;
pub mod registry;
pub mod template;
#[cfg(test)]
pub mod test_utils;
