pub mod catalog;
pub mod composer;
pub mod config;
pub mod cosine;
pub mod engine;
pub mod error;
pub mod features;
pub mod index;
pub mod loader;
pub mod protocol;
pub mod resolver;
pub mod server;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;
