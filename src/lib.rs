//! Recipe import gateway.
//!
//! Turns a recipe URL or raw recipe text into Cooklang markup, either by
//! running the `cooklang-import` command-line tool or by prompting a remote
//! chat-completion model, and serves the result over a small JSON API.

pub mod config;
pub mod converters;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod gateway;
pub mod markup;
pub mod model;
pub mod providers;
pub mod server;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use extractors::extract_metadata;
pub use gateway::Gateway;
pub use markup::{extract_title, strip_code_fences};
pub use model::{ImportResponse, RecipeMetadata};
pub use server::router;
