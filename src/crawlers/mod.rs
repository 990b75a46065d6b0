pub mod crawler;
pub mod web;

#[cfg(test)]
pub mod memory;

pub use crawler::{DetailProvider, ProtestSource, SearchSession};
pub use web::WebDriverSource;
