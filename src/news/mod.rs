//! Translation, summarization and article processing endpoints.

pub mod dtos;
pub mod handlers;
