//! # Probe Table
//!
//! A string-keyed hash table built directly over a flat array of slots.
//!
//! Collisions are resolved with open addressing: every key starts at the slot
//! given by a polynomial hash of its bytes and then follows a probe sequence
//! derived from a random permutation of the offsets `1..capacity`. The
//! permutation is regenerated whenever the table doubles.
//!
//! Removal marks a slot as a tombstone instead of emptying it, so lookups for
//! other keys keep walking past it, while a never-used slot ends the walk. The
//! table doubles before an insert would bring the load factor to one half.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probe_table::ProbeTable;
//!
//! // Create a new table with the default capacity of 8 slots
//! let mut table = ProbeTable::new();
//!
//! // Insert values; duplicates are rejected
//! assert!(table.insert("apple", 1));
//! assert!(table.insert("banana", 2));
//! assert!(!table.insert("apple", 10));
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // Read and write through one call, inserting a default if needed
//! *table.get_or_insert_default("cherry") += 3;
//! assert_eq!(table.get("cherry"), Some(&3));
//!
//! // Remove values
//! assert!(table.remove("apple"));
//! assert_eq!(table.get("apple"), None);
//! assert!(table.load_factor() < 0.5);
//! ```
//!
//! ## Inspecting the layout
//!
//! ```rust
//! use probe_table::{ProbeTable, SlotTag};
//!
//! let mut table: ProbeTable = ProbeTable::new();
//! assert_eq!(table.to_string(), "Table is empty\n");
//!
//! table.insert("a", 1);
//! table.remove("a");
//! let tombstones = table.slots().iter().filter(|slot| slot.tag() == SlotTag::Tombstoned).count();
//! assert_eq!(tombstones, 1);
//! ```

/// Insert failure reasons
mod error;
/// The storage cell of the table
mod slot;
/// Module implementing the open-addressing table
mod table;
/// Hashing and probe-offset helpers
mod utils;

pub use error::InsertError;
pub use slot::{Slot, SlotTag};
pub use table::{DEFAULT_INITIAL_CAPACITY, Iter, MAX_LOAD_FACTOR, ProbeTable};
pub use utils::{home_index, polynomial_hash};
