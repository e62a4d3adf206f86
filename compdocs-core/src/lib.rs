#![doc = "compdocs-core: pipeline that keeps a component reference section in sync with a UI library's exports."]

//! The pipeline reads the library's index module, derives one page per
//! exported component and reconciles a docs directory against that page set.
//! The CLI lives in the `compdocs` crate; everything with behaviour lives here.
//!
//! # Usage
//! Build a [`config::SynchroniseConfig`], pick a [`contract::SourceFetcher`]
//! (normally [`download::HttpFetcher`]) and call [`synchronise::synchronise`].

pub mod config;
pub mod contract;
pub mod download;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod reconcile;
pub mod render;
pub mod slug;
pub mod synchronise;

pub use error::SyncError;
