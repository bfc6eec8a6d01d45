//! Wishlist and comparison state
//!
//! Per-session state backing the "saved concerts" list and the two-slot
//! side-by-side comparison board. Everything here is synchronous and
//! in-memory; nothing is persisted.
//!
//! Drag payloads are flat snapshots (identity key plus display fields), so
//! plain JSON round-trips them. There are no references back into the
//! catalog and therefore nothing cyclic to encode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A concert snapshot saved to the wishlist or dropped on a compare slot.
///
/// Identity is the `cid` when present, the `id` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: String,
    #[serde(default)]
    pub cid: Option<String>,
    pub artist: String,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl WishlistEntry {
    /// The key entries are deduplicated and removed by
    pub fn identity(&self) -> &str {
        self.cid.as_deref().unwrap_or(&self.id)
    }
}

/// Which side of the comparison board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareSide {
    Left,
    Right,
}

/// One comparison position: empty, or holding a concert snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CompareSlot {
    #[default]
    Empty,
    Holding {
        concert: WishlistEntry,
    },
}

impl CompareSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, CompareSlot::Empty)
    }

    /// The held snapshot, if any
    pub fn concert(&self) -> Option<&WishlistEntry> {
        match self {
            CompareSlot::Empty => None,
            CompareSlot::Holding { concert } => Some(concert),
        }
    }
}

/// Error decoding a dragged concert payload
#[derive(Debug, thiserror::Error)]
#[error("invalid drag payload: {0}")]
pub struct PayloadError(#[from] serde_json::Error);

/// Wishlist plus comparison board for one session.
///
/// The wishlist holds no duplicate identity keys and stays sorted by concert
/// date ascending. The two compare slots are fully independent: filling or
/// clearing one never touches the other.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WishlistCompareState {
    wishlist: Vec<WishlistEntry>,
    left: CompareSlot,
    right: CompareSlot,
}

impl WishlistCompareState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved concerts, sorted by date ascending
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    /// Add a concert to the wishlist. Idempotent: adding an identity key
    /// that is already present is a no-op.
    pub fn add_to_wishlist(&mut self, entry: WishlistEntry) {
        if self.is_in_wishlist(&entry) {
            return;
        }

        self.wishlist.push(entry);
        // stable sort: equal dates keep insertion order
        self.wishlist.sort_by_key(|e| e.date);
    }

    /// Remove a concert by identity key. No-op when absent.
    pub fn remove_from_wishlist(&mut self, entry: &WishlistEntry) {
        let key = entry.identity();
        self.wishlist.retain(|e| e.identity() != key);
    }

    /// Whether a concert with the same identity key is saved
    pub fn is_in_wishlist(&self, entry: &WishlistEntry) -> bool {
        let key = entry.identity();
        self.wishlist.iter().any(|e| e.identity() == key)
    }

    /// Read one side of the comparison board
    pub fn slot(&self, side: CompareSide) -> &CompareSlot {
        match side {
            CompareSide::Left => &self.left,
            CompareSide::Right => &self.right,
        }
    }

    /// Decode a dragged concert payload and place it on one side
    pub fn drop_on_slot(&mut self, side: CompareSide, payload: &str) -> Result<(), PayloadError> {
        let concert: WishlistEntry = serde_json::from_str(payload)?;
        *self.slot_mut(side) = CompareSlot::Holding { concert };
        Ok(())
    }

    /// Empty one side, leaving the other untouched
    pub fn clear_slot(&mut self, side: CompareSide) {
        *self.slot_mut(side) = CompareSlot::Empty;
    }

    fn slot_mut(&mut self, side: CompareSide) -> &mut CompareSlot {
        match side {
            CompareSide::Left => &mut self.left,
            CompareSide::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> WishlistEntry {
        WishlistEntry {
            id: id.to_string(),
            cid: None,
            artist: "The Strokes".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            venue: "Alexandra Palace".to_string(),
            city: "London".to_string(),
            price: 65.0,
            image: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = WishlistCompareState::new();
        state.add_to_wishlist(entry("c1", "2024-03-01"));
        state.add_to_wishlist(entry("c1", "2024-03-01"));

        assert_eq!(state.wishlist().len(), 1);
    }

    #[test]
    fn test_identity_prefers_cid() {
        let mut a = entry("row-1", "2024-03-01");
        a.cid = Some("shared".to_string());
        let mut b = entry("row-2", "2024-04-01");
        b.cid = Some("shared".to_string());

        let mut state = WishlistCompareState::new();
        state.add_to_wishlist(a);
        state.add_to_wishlist(b);

        assert_eq!(state.wishlist().len(), 1);
    }

    #[test]
    fn test_wishlist_sorted_by_date_ascending() {
        let mut state = WishlistCompareState::new();
        state.add_to_wishlist(entry("a", "2024-03-01"));
        state.add_to_wishlist(entry("b", "2024-01-15"));
        state.add_to_wishlist(entry("c", "2024-02-10"));

        let dates: Vec<String> = state
            .wishlist()
            .iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-02-10", "2024-03-01"]);
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let mut state = WishlistCompareState::new();
        state.add_to_wishlist(entry("first", "2024-05-01"));
        state.add_to_wishlist(entry("second", "2024-05-01"));
        state.add_to_wishlist(entry("earlier", "2024-04-01"));

        let ids: Vec<&str> = state.wishlist().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut state = WishlistCompareState::new();
        state.add_to_wishlist(entry("a", "2024-03-01"));
        state.remove_from_wishlist(&entry("missing", "2024-03-01"));

        assert_eq!(state.wishlist().len(), 1);

        state.remove_from_wishlist(&entry("a", "2024-03-01"));
        assert!(state.wishlist().is_empty());
    }

    #[test]
    fn test_compare_slots_are_independent() {
        let mut state = WishlistCompareState::new();
        let x = serde_json::to_string(&entry("x", "2024-03-01")).unwrap();
        let y = serde_json::to_string(&entry("y", "2024-04-01")).unwrap();

        state.drop_on_slot(CompareSide::Left, &x).unwrap();
        state.drop_on_slot(CompareSide::Right, &y).unwrap();
        state.clear_slot(CompareSide::Left);

        assert!(state.slot(CompareSide::Left).is_empty());
        let held = state.slot(CompareSide::Right).concert().unwrap();
        assert_eq!(held.id, "y");
    }

    #[test]
    fn test_drop_replaces_previous_occupant() {
        let mut state = WishlistCompareState::new();
        let x = serde_json::to_string(&entry("x", "2024-03-01")).unwrap();
        let y = serde_json::to_string(&entry("y", "2024-04-01")).unwrap();

        state.drop_on_slot(CompareSide::Left, &x).unwrap();
        state.drop_on_slot(CompareSide::Left, &y).unwrap();

        assert_eq!(state.slot(CompareSide::Left).concert().unwrap().id, "y");
    }

    #[test]
    fn test_malformed_payload_leaves_slot_untouched() {
        let mut state = WishlistCompareState::new();
        let x = serde_json::to_string(&entry("x", "2024-03-01")).unwrap();
        state.drop_on_slot(CompareSide::Left, &x).unwrap();

        assert!(state
            .drop_on_slot(CompareSide::Left, "{not json")
            .is_err());
        assert_eq!(state.slot(CompareSide::Left).concert().unwrap().id, "x");
    }
}
