//! Persistent track selection: the durable-word contract and restore-time
//! validation.
//!
//! Storage is modeled as a single 16-bit word holding the selected track
//! index. A store that has never been written, was erased, or fails its
//! integrity checks reads as [`ERASED_WORD`]; [`restore_selection`] corrects
//! any invalid word to track 0 and writes the correction back. Corruption is
//! never fatal.

use crate::Result;
use crate::logging::info;
use crate::tracks::TrackId;

/// Word read from a store that holds no valid selection.
pub const ERASED_WORD: u16 = 0xFFFF;

/// Durable storage for the current track selection.
pub trait SelectionStore {
    /// The raw stored word; [`ERASED_WORD`] when the store is empty or
    /// unreadable. Loading never fails.
    fn load_word(&mut self) -> u16;

    /// Durably records `id` as the current selection.
    fn store_selection(&mut self, id: TrackId) -> Result<()>;
}

/// Loads the persisted selection, correcting invalid contents to track 0.
///
/// An erased or out-of-range word is rewritten as track 0 so later loads see
/// a valid index; a valid stored index is returned unchanged with no write.
pub fn restore_selection<S: SelectionStore>(store: &mut S) -> Result<TrackId> {
    let word = store.load_word();
    if let Some(id) = TrackId::from_word(word) {
        info!("selection: restored track {}", id.index());
        Ok(id)
    } else {
        info!("selection: stored word {} invalid, resetting to track 0", word);
        store.store_selection(TrackId::FIRST)?;
        Ok(TrackId::FIRST)
    }
}
