//! # hiermap - Stable integer handles for hierarchy nodes
//!
//! This library provides [`IdMap`], a bidirectional map between tree nodes
//! and small 1-based `u32` handles, for hierarchies whose nodes must be
//! addressable by a plain integer across an API boundary.
//!
//! A handle stays valid until the node is explicitly released; released slots
//! are recycled for later allocations (most recently freed first) so the
//! table stays proportional to the peak number of live nodes. `0` is never a
//! valid handle and is left to callers as a "no node" marker.
//!
//! # Example
//!
//! ```
//! use hiermap::IdMap;
//! use std::sync::Arc;
//!
//! let mut map = IdMap::new();
//!
//! let trunk = Arc::new("trunk");
//! let branch = Arc::new("branch");
//!
//! let trunk_id = map.allocate(trunk.clone());
//! let branch_id = map.allocate(branch.clone());
//!
//! assert!(map.lookup(trunk_id.get()).is_some());
//!
//! map.release(&branch, branch_id)?;
//! assert!(map.lookup(branch_id.get()).is_none());
//! # hiermap::Result::<()>::Ok(())
//! ```
//!
//! # Threading
//!
//! [`IdMap`] has no internal locking and is meant to be owned by the one
//! place that mutates the hierarchy. When several threads need access, spawn
//! a [`MapHandle`]: a dedicated owner thread holds the map and cloneable
//! handles route requests to it.

#![warn(missing_docs, unreachable_pub)]

mod error;
mod map;
mod node;
mod owner;

pub use self::{
    error::{Error, ErrorKind},
    map::{IdMap, ItemId},
    node::NodeRef,
    owner::MapHandle,
};

/// Alias for `Result<T, Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
