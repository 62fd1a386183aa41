pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{BROWSER_USER_AGENT, FETCH_TIMEOUT, fetch, fetch_url};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
