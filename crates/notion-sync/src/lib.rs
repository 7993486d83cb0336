//! Annict → Notion page sync.
//!
//! This library maps Annict work records to Notion database properties,
//! enriches new pages with pictures from the Jikan API v4, and creates or
//! updates the pages through the Notion API.

pub mod api;
pub mod properties;
pub mod sync;

pub use api::{JikanClient, JikanError, NotionClient, NotionPage};
pub use properties::{PageProperties, PropertyMapper, PropertyValue};
pub use sync::PageSynchronizer;
