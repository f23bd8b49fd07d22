use std::{fmt, iter, mem, slice};

use log::{debug, error};

use crate::{
    error::InsertError,
    slot::Slot,
    utils::{home_index, shuffled_offsets},
};

/// Capacity of a table created with [`ProbeTable::new`]
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

/// Load factor an insert is never allowed to reach; the table doubles first.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A string-keyed hash table using open addressing.
///
/// Collisions are resolved by walking a probe sequence built from a random
/// permutation of the offsets `1..capacity`. The permutation is shared by
/// every key and regenerated whenever the capacity changes, so a key with home
/// slot `h` visits `h, h + offsets[0], h + offsets[1], ...` (modulo capacity).
///
/// Removal leaves a tombstone so that probes for other keys keep walking past
/// it. Tombstones are only discarded when the table is rehashed into a new
/// array, which happens by doubling before an insert would bring the load
/// factor to [`MAX_LOAD_FACTOR`].
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbeTable<V = usize> {
    /// The backing array, its length is the capacity
    slots: Vec<Slot<V>>,
    /// Random permutation of `1..capacity` used to derive probe sequences
    offsets: Vec<usize>,
    /// Number of occupied slots
    count: usize,
}

impl<V> Default for ProbeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ProbeTable<V>
where
    K: Into<String>,
{
    /// Inserts every pair; pairs whose key is already present are skipped.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ProbeTable<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<V> ProbeTable<V> {
    /// Creates an empty table with [`DEFAULT_INITIAL_CAPACITY`] slots
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty table with `capacity` slots (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self { slots: fresh_slots(capacity), offsets: shuffled_offsets(capacity), count: 0 }
    }

    /// Positions visited when looking for a key whose home slot is `home`
    #[allow(clippy::arithmetic_side_effects)]
    fn probe_sequence(&self, home: usize) -> impl Iterator<Item = usize> + '_ {
        let capacity = self.slots.len();
        // `home` and every offset are below `capacity`, so the sum cannot overflow.
        iter::once(home).chain(self.offsets.iter().map(move |offset| (home + offset) % capacity))
    }

    /// Returns the index of the slot holding `key`.
    ///
    /// The walk stops at the first never-used slot: an insert of `key` would
    /// have landed there at the latest. Tombstones do not stop it.
    #[must_use]
    pub fn find_slot_index(&self, key: &str) -> Option<usize> {
        let home = home_index(key, self.slots.len());

        for index in self.probe_sequence(home) {
            let slot = self.slots.get(index)?;
            if slot.holds(key) {
                return Some(index);
            }
            if slot.is_empty_since_start() {
                return None;
            }
        }

        None
    }

    /// Returns the first never-used or tombstoned slot on the probe sequence of `key`
    fn find_vacant_index(&self, key: &str) -> Option<usize> {
        let home = home_index(key, self.slots.len());
        self.probe_sequence(home).find(|&index| self.slots.get(index).is_some_and(Slot::is_empty))
    }

    /// Returns true if inserting one more entry would reach the load-factor bound
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn needs_growth(&self) -> bool {
        (self.count.saturating_add(1) as f64) / (self.slots.len() as f64) >= MAX_LOAD_FACTOR
    }

    /// Doubles the table until one more entry fits under the load-factor bound
    fn grow_if_needed(&mut self) {
        while self.needs_growth() {
            self.resize();
        }
    }

    /// Rehashes every live entry into a fresh array of twice the capacity
    fn resize(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity.saturating_mul(2);
        debug!(
            "resizing probe table from {old_capacity} to {new_capacity} slots with {} live entries",
            self.count
        );

        let old_slots = mem::replace(&mut self.slots, fresh_slots(new_capacity));
        self.offsets = shuffled_offsets(new_capacity);
        self.count = 0;

        for (key, value) in old_slots.into_iter().filter_map(Slot::into_entry) {
            if let Err(err) = self.place(key, value) {
                error!("entry dropped while rehashing: {err}");
            }
        }
    }

    /// Loads a pair into the first empty slot of its probe sequence.
    ///
    /// Does not check for duplicates or grow the table.
    fn place(&mut self, key: String, value: V) -> Result<usize, InsertError> {
        let capacity = self.capacity();
        let vacant = self.find_vacant_index(&key);
        debug_assert!(vacant.is_some(), "no empty slot in a probe table of capacity {capacity}");

        let Some((index, slot)) =
            vacant.and_then(|index| self.slots.get_mut(index).map(|slot| (index, slot)))
        else {
            error!("probe sequence of {key:?} exhausted at capacity {capacity}");
            return Err(InsertError::Exhausted { capacity });
        };

        slot.load(key, value);
        self.count = self.count.saturating_add(1);
        Ok(index)
    }

    /// Inserts a new key-value pair and returns a handle to the stored value.
    ///
    /// The table is doubled first if the insert would bring the load factor to
    /// [`MAX_LOAD_FACTOR`]. That check runs before the duplicate check, so even
    /// a rejected insert may grow the table.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateKey`] if the key is already present,
    /// leaving its value untouched, and [`InsertError::Exhausted`] if no empty
    /// slot could be found.
    pub fn try_insert(&mut self, key: impl Into<String>, value: V) -> Result<&mut V, InsertError> {
        self.grow_if_needed();

        let key = key.into();
        if self.find_slot_index(&key).is_some() {
            return Err(InsertError::DuplicateKey { key });
        }

        let capacity = self.capacity();
        let index = self.place(key, value)?;
        self.slots.get_mut(index).and_then(Slot::value_mut).ok_or(InsertError::Exhausted { capacity })
    }

    /// Inserts a new key-value pair.
    ///
    /// Returns false if the key was already present; the existing value is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> bool {
        self.try_insert(key, value).is_ok()
    }

    /// Removes a key, returning true if it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes a key and returns the pair it belonged to.
    ///
    /// The slot becomes a tombstone so later probes keep walking past it.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let index = self.find_slot_index(key)?;
        let entry = self.slots.get_mut(index)?.clear();

        if entry.is_some() {
            self.count = self.count.saturating_sub(1);
        }

        entry
    }

    /// Returns true if the table contains the given key
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find_slot_index(key).is_some()
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_slot_index(key)?;
        self.slots.get(index).and_then(Slot::value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_slot_index(key)?;
        self.slots.get_mut(index).and_then(Slot::value_mut)
    }

    /// Returns a mutable handle to the value of `key`, inserting `V::default()`
    /// first if the key is missing.
    ///
    /// A missing key is not an error: reading through the handle of a fresh
    /// entry yields the default value, and the key stays in the table.
    ///
    /// # Panics
    ///
    /// Panics if the slot that was just located or filled holds no entry,
    /// which the load-factor bound rules out.
    #[allow(clippy::expect_used)]
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let index = self.find_slot_index(key).or_else(|| {
            self.grow_if_needed();
            self.place(key.to_owned(), V::default()).ok()
        });

        index
            .and_then(|index| self.slots.get_mut(index))
            .and_then(Slot::value_mut)
            .expect("located or freshly inserted slot must hold an entry")
    }

    /// Returns the keys in slot order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns the values in slot order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }

    /// Read-only view of the backing array
    #[must_use]
    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    /// Resets every slot to never-used, keeping the capacity
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::NeverUsed);
        self.count = 0;
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the ratio of occupied slots to capacity, 0.0 for a table without slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.count as f64 / self.slots.len() as f64
    }
}

/// Allocates `capacity` never-used slots
fn fresh_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(Slot::default).take(capacity).collect()
}

impl<V: fmt::Display> fmt::Display for ProbeTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Table is empty");
        }

        for (index, slot) in self.slots.iter().enumerate().filter(|(_, slot)| slot.is_occupied()) {
            writeln!(f, "Bucket {index}: {slot}")?;
        }

        Ok(())
    }
}

/// Iterator over the key-value pairs of a [`ProbeTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots of the backing array
    slots: slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            Slot::NeverUsed | Slot::Tombstoned => None,
        })
    }
}

impl<'a, V> IntoIterator for &'a ProbeTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
