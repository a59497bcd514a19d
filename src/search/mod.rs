//! Search Module
//!
//! Catalog-wide search across songs, albums, artists, playlists, and
//! categories.
//!
//! ## Overview
//! Matching is case-insensitive substring containment on names (songs and
//! albums also match their artist's name). Each entity list carries its own
//! ranking signal: popularity for songs, favorite count for albums, artists,
//! and playlists, song count for categories. A single "top result" is
//! picked across all lists: exact name matches win in a fixed priority
//! order, otherwise the head of the first non-empty list.
//!
//! ## Submodules
//! - **`engine`**: matching, ranking, and top-result selection.
//! - **`handlers`**: HTTP request handler for the Axum web server.
//! - **`types`**: response DTOs, including the tagged top result.

pub mod engine;
pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
