use thiserror::Error;

/// Reasons an insert into a [`ProbeTable`](crate::ProbeTable) can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The key is already present; the stored value was left untouched.
    #[error("key {key:?} is already present")]
    DuplicateKey {
        /// The rejected key, handed back to the caller
        key: String,
    },
    /// The probe sequence ran out without meeting an empty slot.
    ///
    /// The load-factor bound makes this unreachable; seeing it means the table
    /// invariants were broken.
    #[error("no empty slot on the probe sequence of a table with capacity {capacity}")]
    Exhausted {
        /// Capacity of the table at the time of the failed insert
        capacity: usize,
    },
}
