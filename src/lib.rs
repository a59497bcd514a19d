//! Music Catalog & Account Backend Library
//!
//! This library crate defines the core modules of the backend.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`accounts`**: Identity layer. Registration, opaque-token sessions,
//!   profile updates, and OTP-based password reset.
//! - **`catalog`**: The music catalog. Categories, artists, albums, songs,
//!   playlists, and per-user favorites with their CRUD and membership
//!   endpoints.
//! - **`recommend`**: The recommendation pipeline. Ranks candidates drawn
//!   from similar users' favorites and shared categories, with a global
//!   popularity fallback.
//! - **`search`**: Catalog-wide search. Substring matching per entity with
//!   ranked lists and a prioritized top result.
//! - **`storage`**: The shared state layer. Concurrent in-memory entity
//!   tables with sequence-allocated ids.

pub mod accounts;
pub mod catalog;
pub mod recommend;
pub mod search;
pub mod storage;
