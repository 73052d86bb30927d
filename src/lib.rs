#![doc = include_str!("../README.md")]
#![allow(clippy::doc_markdown)]

pub mod api;
pub mod appliance;
pub mod engine;
pub mod error;
pub mod history;
pub mod prelude;
pub mod quantity;
pub mod rates;
pub mod store;
