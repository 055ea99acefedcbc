// src/notion/mod.rs

//! Read-only client for the Notion database that holds the quiz records.

pub mod client;
pub mod error;
pub mod filter;
pub mod property;

pub use client::{NotionClient, Page, QueryOutcome, QueryRequest, QueryResponse};
pub use error::StoreError;
pub use filter::QueryFilter;
pub use property::PropertyValue;
