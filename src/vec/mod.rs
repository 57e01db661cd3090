//! Vector Module
//!
//! The storage-vector engine.
//!
//! ## Responsibilities
//! - Map logical indices to physical slot keys
//! - Keep the length record consistent with the physical layout
//! - Express every mutation as a minimal sequence of slot reads/writes
//!
//! ## Invariant
//! Occupied slots are exactly the indices in `[0, len)`. Slots at or
//! beyond `len` may hold stale bytes from earlier occupancy; they are
//! never read as meaningful and never proactively erased (growth
//! overwrites them). Nothing here relies on "deleted implies zero".
//!
//! ## Operation ordering
//! Every operation validates its preconditions before touching storage,
//! and operations that change occupancy write the length record as
//! their final step. Element shifts move raw words between slots
//! without decoding, so out-of-line elements relocate at one read plus
//! one write apiece.

mod iter;

pub use iter::Iter;

use std::marker::PhantomData;

use crate::codec::{SlotElement, Word};
use crate::error::{Result, SlotVecError};
use crate::key::BaseKey;
use crate::store::StorageBackend;

/// A persistent, dynamically-sized vector of slot-encoded elements
///
/// The vector is never resident in memory: every access is an
/// independent keyed read or write against the backend, and slot keys
/// are derived fresh on each access. One backend can serve many vectors
/// as long as their base keys differ; vectors with distinct bases never
/// interact.
pub struct StorageVec<T, S> {
    /// Injected storage backend
    store: S,

    /// Root identifier all of this vector's keys derive from
    base: BaseKey,

    _element: PhantomData<fn() -> T>,
}

impl<T: SlotElement, S: StorageBackend> StorageVec<T, S> {
    /// Create a handle to the vector rooted at `base`
    ///
    /// No storage is touched; a vector whose header was never written
    /// reads as empty.
    pub fn new(store: S, base: BaseKey) -> Self {
        Self {
            store,
            base,
            _element: PhantomData,
        }
    }

    // =========================================================================
    // Length
    // =========================================================================

    /// Number of elements
    pub fn len(&self) -> Result<u64> {
        self.read_len()
    }

    /// Whether the vector holds no elements
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_len()? == 0)
    }

    /// Reset the length to zero
    ///
    /// Element slots are not erased; they become unreachable and will be
    /// overwritten by later growth.
    pub fn clear(&self) -> Result<()> {
        self.write_len(0)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read the element at `index`
    pub fn get(&self, index: u64) -> Result<T> {
        let len = self.read_len()?;
        Self::check_index(index, len)?;

        let word = self.slot_word(index)?;
        T::decode(&self.store, word)
    }

    /// Read the first element
    pub fn first(&self) -> Result<T> {
        let len = self.read_len()?;
        if len == 0 {
            return Err(SlotVecError::Empty);
        }

        let word = self.slot_word(0)?;
        T::decode(&self.store, word)
    }

    /// Read the last element
    pub fn last(&self) -> Result<T> {
        let len = self.read_len()?;
        if len == 0 {
            return Err(SlotVecError::Empty);
        }

        let word = self.slot_word(len - 1)?;
        T::decode(&self.store, word)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Overwrite the element at `index`
    pub fn set(&self, index: u64, value: T) -> Result<()> {
        let len = self.read_len()?;
        Self::check_index(index, len)?;

        let word = value.encode(&self.store)?;
        self.write_slot_word(index, word)
    }

    /// Append an element
    pub fn push(&self, value: T) -> Result<()> {
        let len = self.read_len()?;

        let word = value.encode(&self.store)?;
        self.write_slot_word(len, word)?;
        self.write_len(len + 1)
    }

    /// Remove and return the last element
    pub fn pop(&self) -> Result<T> {
        let len = self.read_len()?;
        if len == 0 {
            return Err(SlotVecError::Empty);
        }

        let word = self.slot_word(len - 1)?;
        let value = T::decode(&self.store, word)?;

        self.write_len(len - 1)?;
        Ok(value)
    }

    // =========================================================================
    // Rearrangement
    // =========================================================================

    /// Exchange the elements at `i` and `j`
    pub fn swap(&self, i: u64, j: u64) -> Result<()> {
        let len = self.read_len()?;
        Self::check_index(i, len)?;
        Self::check_index(j, len)?;

        if i == j {
            return Ok(());
        }

        let word_i = self.slot_word(i)?;
        let word_j = self.slot_word(j)?;
        self.write_slot_word(i, word_j)?;
        self.write_slot_word(j, word_i)
    }

    /// Remove the element at `index`, moving the last element into its
    /// place
    ///
    /// O(1) slot operations regardless of position; relative order of
    /// the remaining elements changes only for the element moved.
    pub fn swap_remove(&self, index: u64) -> Result<T> {
        let len = self.read_len()?;
        Self::check_index(index, len)?;

        let word = self.slot_word(index)?;
        let value = T::decode(&self.store, word)?;

        if index != len - 1 {
            let last = self.slot_word(len - 1)?;
            self.write_slot_word(index, last)?;
        }

        self.write_len(len - 1)?;
        Ok(value)
    }

    /// Remove the element at `index`, preserving the order of the rest
    ///
    /// Shifts the elements above `index` down one slot each, scanning
    /// upward so every slot is read before it is overwritten. O(len -
    /// index) slot operations.
    pub fn remove(&self, index: u64) -> Result<T> {
        let len = self.read_len()?;
        Self::check_index(index, len)?;

        let word = self.slot_word(index)?;
        let value = T::decode(&self.store, word)?;

        // Shift down: slot[k] -> slot[k-1] for k in index+1..len
        for k in (index + 1)..len {
            let shifted = self.slot_word(k)?;
            self.write_slot_word(k - 1, shifted)?;
        }

        self.write_len(len - 1)?;
        Ok(value)
    }

    /// Insert an element at `index`, shifting the rest up
    ///
    /// Shifts from the top down so no slot's old value is destroyed
    /// before it has been read. `index == len` appends. O(len - index)
    /// slot operations.
    pub fn insert(&self, index: u64, value: T) -> Result<()> {
        let len = self.read_len()?;
        if index > len {
            return Err(SlotVecError::OutOfBounds { index, len });
        }

        let word = value.encode(&self.store)?;

        // Shift up: slot[k] -> slot[k+1] for k in len-1..index, descending
        for k in (index..len).rev() {
            let shifted = self.slot_word(k)?;
            self.write_slot_word(k + 1, shifted)?;
        }

        self.write_slot_word(index, word)?;
        self.write_len(len + 1)
    }

    /// Reverse the element order in place
    pub fn reverse(&self) -> Result<()> {
        let len = self.read_len()?;

        for k in 0..len / 2 {
            let j = len - 1 - k;
            let word_k = self.slot_word(k)?;
            let word_j = self.slot_word(j)?;
            self.write_slot_word(k, word_j)?;
            self.write_slot_word(j, word_k)?;
        }

        Ok(())
    }

    /// Overwrite every element with `value`
    ///
    /// Encodes once and replicates the word, so an out-of-line fill
    /// value is written at most one payload. Length is unchanged.
    pub fn fill(&self, value: T) -> Result<()> {
        let len = self.read_len()?;
        if len == 0 {
            return Ok(());
        }

        let word = value.encode(&self.store)?;
        for k in 0..len {
            self.write_slot_word(k, word)?;
        }

        Ok(())
    }

    /// Grow or shrink to `new_len`
    ///
    /// Growth writes `value` into the new slots (encoded once);
    /// shrinking only rewrites the length record, leaving stale slots
    /// behind.
    pub fn resize(&self, new_len: u64, value: T) -> Result<()> {
        let len = self.read_len()?;

        if new_len > len {
            let word = value.encode(&self.store)?;
            for k in len..new_len {
                self.write_slot_word(k, word)?;
            }
        }

        self.write_len(new_len)
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Iterate over the elements in index order
    ///
    /// The length is read once up front; each step is one slot read
    /// plus a decode.
    pub fn iter(&self) -> Result<Iter<'_, T, S>> {
        let len = self.read_len()?;
        Ok(Iter::new(self, len))
    }

    /// Collect all elements into a `Vec`
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter()?.collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The vector's base identifier
    pub fn base(&self) -> BaseKey {
        self.base
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Read the length record (absent header reads as 0)
    fn read_len(&self) -> Result<u64> {
        Ok(self
            .store
            .read(self.base.header_key())?
            .map(|word| word.to_u64())
            .unwrap_or(0))
    }

    /// Write the length record
    ///
    /// The final step of every occupancy-changing operation.
    fn write_len(&self, len: u64) -> Result<()> {
        self.store.write(self.base.header_key(), Word::from_u64(len))
    }

    /// Read the raw word at `index`
    ///
    /// Only called for indices below the current length, where a slot
    /// must exist; absence means the medium lost data.
    fn slot_word(&self, index: u64) -> Result<Word> {
        self.store.read(self.base.slot_key(index))?.ok_or_else(|| {
            SlotVecError::Corruption(format!("Occupied slot {} is missing from storage", index))
        })
    }

    /// Write the raw word at `index`
    fn write_slot_word(&self, index: u64, word: Word) -> Result<()> {
        self.store.write(self.base.slot_key(index), word)
    }

    /// Reject indices at or beyond the current length
    fn check_index(index: u64, len: u64) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(SlotVecError::OutOfBounds { index, len })
        }
    }
}
