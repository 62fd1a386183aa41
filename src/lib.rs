pub mod app_state;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod news;
pub mod repositories;
pub mod router;
pub mod summarizer;
pub mod text;
pub mod translator;
