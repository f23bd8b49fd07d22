use std::{fmt, mem};

/// Lifecycle state of a [`Slot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotTag {
    /// Nothing has been stored here since the slot array was allocated
    NeverUsed,
    /// An entry was stored here and later removed
    Tombstoned,
    /// The slot holds a live entry
    Occupied,
}

/// A single cell of the table's backing array.
///
/// The key and value only exist in the `Occupied` state. Clearing a slot
/// leaves a tombstone behind; a slot never returns to `NeverUsed` until the
/// whole array is reallocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Never held an entry; probing may stop here
    NeverUsed,
    /// Held an entry that was removed; probing must continue past it
    Tombstoned,
    /// Holds a live key-value pair
    Occupied {
        /// The key of the entry
        key: String,
        /// The value associated with the key
        value: V,
    },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::NeverUsed
    }
}

impl<V> Slot<V> {
    /// Stores a key-value pair, replacing whatever the slot held.
    pub fn load(&mut self, key: String, value: V) {
        *self = Self::Occupied { key, value };
    }

    /// Turns the slot into a tombstone and returns the pair it held, if any.
    pub fn clear(&mut self) -> Option<(String, V)> {
        mem::replace(self, Self::Tombstoned).into_entry()
    }

    /// Returns the tag describing the slot's state
    #[must_use]
    pub fn tag(&self) -> SlotTag {
        match self {
            Self::NeverUsed => SlotTag::NeverUsed,
            Self::Tombstoned => SlotTag::Tombstoned,
            Self::Occupied { .. } => SlotTag::Occupied,
        }
    }

    /// Returns true if the slot can accept a new entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_occupied()
    }

    /// Returns true if the slot has never held an entry
    #[must_use]
    pub fn is_empty_since_start(&self) -> bool {
        matches!(self, Self::NeverUsed)
    }

    /// Returns true if the slot held an entry that was removed
    #[must_use]
    pub fn is_empty_after_remove(&self) -> bool {
        matches!(self, Self::Tombstoned)
    }

    /// Returns true if the slot holds a live entry
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    /// Returns true if the slot is occupied by exactly `key`
    #[must_use]
    pub fn holds(&self, key: &str) -> bool {
        matches!(self, Self::Occupied { key: stored, .. } if stored == key)
    }

    /// Returns the key of an occupied slot
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Occupied { key, .. } => Some(key),
            Self::NeverUsed | Self::Tombstoned => None,
        }
    }

    /// Returns the value of an occupied slot
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Occupied { value, .. } => Some(value),
            Self::NeverUsed | Self::Tombstoned => None,
        }
    }

    /// Returns a mutable handle to the stored value.
    ///
    /// The handle borrows the slot, so it cannot outlive a resize of the table
    /// that owns it.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Occupied { value, .. } => Some(value),
            Self::NeverUsed | Self::Tombstoned => None,
        }
    }

    /// Replaces the value of an occupied slot, returning the previous one.
    ///
    /// Empty slots are left untouched and `None` is returned.
    pub fn set_value(&mut self, value: V) -> Option<V> {
        self.value_mut().map(|current| mem::replace(current, value))
    }

    /// Consumes the slot, yielding its pair if it was occupied
    pub fn into_entry(self) -> Option<(String, V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::NeverUsed | Self::Tombstoned => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { key, value } => write!(f, "<{key}, {value}>"),
            Self::NeverUsed | Self::Tombstoned => Ok(()),
        }
    }
}
