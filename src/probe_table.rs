//! A direct-addressed associative store with linear-probe collision
//! resolution.
//!
//! The table is sized once at construction and never rehashes; it supports
//! insertion and lookup but no deletion, which keeps probe chains stable.
//! Average-case access is O(1) with a decent load factor (the default
//! construction allocates twice the expected item count).

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Error;
use crate::primes::largest_prime_below;

/// A linear-probing hash table keyed by `String`.
///
/// Probing statistics (first-slot conflicts, total probe steps, longest
/// probe chain) are tracked across the table's lifetime and exposed via
/// [`statistics`](ProbeTable::statistics).
///
/// # Examples
///
/// ```
/// use ravl_tree::{Error, ProbeTable};
///
/// let mut table = ProbeTable::with_capacity(4);
/// table.set("tonic", 500)?;
/// table.set("elixir", 2000)?;
///
/// assert_eq!(table.get("tonic")?, &500);
/// assert_eq!(table.get("philter"), Err(Error::KeyNotFound));
/// # Ok::<(), ravl_tree::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ProbeTable<V> {
    slots: Vec<Option<(String, V)>>,
    len: usize,
    /// Modulus for the rolling hash: the largest prime below the slot
    /// count, so positions share no common factor with the multiplier.
    modulus: usize,
    conflicts: usize,
    probe_total: usize,
    probe_max: usize,
}

impl<V> ProbeTable<V> {
    const MIN_SLOTS: usize = 1;

    /// First rolling-hash multiplier.
    const HASH_A: usize = 31_397;
    /// Multiplier applied to `HASH_A` between characters, so anagrams hash
    /// apart.
    const HASH_B: usize = 27_179;

    /// Creates a table that can hold `items` entries, backed by `2 * items`
    /// slots.
    #[must_use]
    pub fn with_capacity(items: usize) -> Self {
        Self::build(items * 2)
    }

    /// Creates a table with an explicit slot count.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CapacityExceeded`] if `slots` cannot hold
    /// `items` entries.
    pub fn with_table_size(items: usize, slots: usize) -> Result<Self, Error> {
        if slots < items {
            return Err(Error::CapacityExceeded);
        }
        Ok(Self::build(slots))
    }

    fn build(slots: usize) -> Self {
        let slots = slots.max(Self::MIN_SLOTS);
        let mut table = Vec::new();
        table.resize_with(slots, || None);
        Self {
            slots: table,
            len: 0,
            modulus: largest_prime_below(slots).unwrap_or(slots),
            conflicts: 0,
            probe_total: 0,
            probe_max: 0,
        }
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Returns the total number of slots.
    #[must_use]
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Returns `(conflicts, total probe steps, longest probe chain)`
    /// accumulated so far.
    ///
    /// A conflict is a key whose home slot was occupied on first contact;
    /// every subsequent slot visited adds one probe step.
    #[must_use]
    pub fn statistics(&self) -> (usize, usize, usize) {
        (self.conflicts, self.probe_total, self.probe_max)
    }

    /// Hashes a name to its home slot in `[0, modulus)`.
    ///
    /// Polynomial rolling hash over the bytes of the name, with the
    /// per-character coefficient itself rolled so anagrams land apart. The
    /// modulus is prime, keeping positions free of common factors with the
    /// coefficients.
    fn hash(&self, name: &str) -> usize {
        let mut value = 0usize;
        let mut a = Self::HASH_A;
        for byte in name.bytes() {
            value = (value.wrapping_mul(a).wrapping_add(byte as usize)) % self.modulus;
            a = a.wrapping_mul(Self::HASH_B) % (self.modulus - 1).max(1);
        }
        value
    }

    /// Walks the probe chain for `name`, starting from its home slot.
    ///
    /// Returns the index of the matching slot, or of the first empty slot
    /// when `for_insert` is set.
    fn probe(&mut self, name: &str, for_insert: bool) -> Result<usize, Error> {
        let mut position = self.hash(name);
        let mut chain = 0usize;

        for _ in 0..self.slots.len() {
            match &self.slots[position] {
                None => {
                    return if for_insert { Ok(position) } else { Err(Error::KeyNotFound) };
                }
                Some((occupant, _)) if occupant == name => return Ok(position),
                Some(_) => {
                    if chain == 0 {
                        self.conflicts += 1;
                    }
                    chain += 1;
                    self.probe_total += 1;
                    self.probe_max = self.probe_max.max(chain);
                    position = (position + 1) % self.slots.len();
                }
            }
        }

        // Every slot visited without a hit.
        if for_insert {
            Err(Error::CapacityExceeded)
        } else {
            Err(Error::KeyNotFound)
        }
    }

    /// Like [`probe`](Self::probe) for lookups, without mutating the
    /// statistics counters.
    fn probe_read(&self, name: &str) -> Result<usize, Error> {
        let mut position = self.hash(name);
        for _ in 0..self.slots.len() {
            match &self.slots[position] {
                None => return Err(Error::KeyNotFound),
                Some((occupant, _)) if occupant == name => return Ok(position),
                Some(_) => position = (position + 1) % self.slots.len(),
            }
        }
        Err(Error::KeyNotFound)
    }

    /// Returns a reference to the item stored under `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the name is absent.
    pub fn get(&self, name: &str) -> Result<&V, Error> {
        let position = self.probe_read(name)?;
        let (_, item) = self.slots[position].as_ref().expect("probe returned an occupied slot");
        Ok(item)
    }

    /// Returns a mutable reference to the item stored under `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the name is absent.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut V, Error> {
        let position = self.probe_read(name)?;
        let (_, item) = self.slots[position].as_mut().expect("probe returned an occupied slot");
        Ok(item)
    }

    /// Returns `true` if `name` has an entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.probe_read(name).is_ok()
    }

    /// Stores `item` under `name`, overwriting any existing entry for the
    /// same name.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CapacityExceeded`] when inserting a new name
    /// into a full table.
    pub fn set(&mut self, name: &str, item: V) -> Result<(), Error> {
        if self.is_full() && !self.contains(name) {
            return Err(Error::CapacityExceeded);
        }
        let position = self.probe(name, true)?;
        if self.slots[position].is_none() {
            self.len += 1;
        }
        self.slots[position] = Some((String::from(name), item));
        Ok(())
    }
}
