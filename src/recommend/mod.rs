//! Recommendation Module
//!
//! Builds the ranked recommendation feed from favorite co-occurrence.
//!
//! ## Overview
//! The pipeline is a bounded, read-only pass over the catalog: collect the
//! caller's favorites, find other users whose favorites overlap, union those
//! users' favorites into candidate sets, add songs that share a category
//! with the caller's favorite songs, and rank everything by how often the
//! whole user base has favorited it. A popularity-ordered list of all songs
//! is always included so anonymous callers and users without favorites
//! still get results.
//!
//! ## Submodules
//! - **`engine`**: the scoring pipeline over the catalog store.
//! - **`handlers`**: HTTP request handler for the Axum web server.
//! - **`types`**: response DTOs.

pub mod engine;
pub mod handlers;
pub mod types;
