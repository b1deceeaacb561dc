//! Hash table implementations
//!
//! - `HashTable`: separate-chaining table with owned per-bucket chains,
//!   resize-before-insert at a configurable load factor, and AHash hashing by
//!   default

mod chained_hash_map;

pub use chained_hash_map::HashTable;
