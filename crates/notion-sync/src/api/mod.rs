//! HTTP clients for the Jikan picture lookup and the Notion pages API.

pub mod jikan;
pub mod notion;
pub mod types;

pub use jikan::{JikanClient, JikanError};
pub use notion::NotionClient;
pub use types::*;
