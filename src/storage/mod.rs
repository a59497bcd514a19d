//! In-Memory Storage Module
//!
//! Implements the shared entity store backing the catalog and account
//! subsystems.
//!
//! ## Core Concepts
//! - **Tables**: each entity kind lives in its own [`memory::EntityMap`],
//!   a concurrent map keyed by a monotonically allocated `u64` id.
//! - **Access**: reads clone values out of the map; writers mutate rows in
//!   place through short closures. There is no interior locking beyond the
//!   map shards themselves.
//! - **Joins**: relational lookups (songs of an artist, favorite counts)
//!   are composed on top of the tables by the owning stores.

pub mod memory;

#[cfg(test)]
mod tests;
