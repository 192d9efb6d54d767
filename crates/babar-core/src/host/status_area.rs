use smallvec::SmallVec;

use super::{PanelSide, StatusPlacement};

/// Ordering of status-area items within each panel side.
///
/// Items are kept sorted by priority (lower first); equal priorities keep
/// insertion order. The returned positions are child indices inside the
/// side's container.
#[derive(Debug, Default)]
pub struct StatusLayout {
    items: SmallVec<[StatusPlacement; 8]>,
}

impl StatusLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item and return its index within its side.
    ///
    /// Re-inserting an existing key moves it.
    pub fn insert(&mut self, placement: StatusPlacement) -> usize {
        self.remove(placement.key);

        let position = self
            .items
            .iter()
            .position(|p| p.side == placement.side && p.priority > placement.priority)
            .or_else(|| {
                self.items
                    .iter()
                    .rposition(|p| p.side == placement.side)
                    .map(|i| i + 1)
            })
            .unwrap_or(self.items.len());

        self.items.insert(position, placement);
        self.index_in_side(position)
    }

    /// Forget an item, returning the index it had within its side.
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        let position = self.items.iter().position(|p| p.key == key)?;
        let index = self.index_in_side(position);
        self.items.remove(position);
        Some(index)
    }

    pub fn keys(&self, side: PanelSide) -> impl Iterator<Item = &'static str> + '_ {
        self.items.iter().filter(move |p| p.side == side).map(|p| p.key)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_in_side(&self, position: usize) -> usize {
        let side = self.items[position].side;
        self.items[..position].iter().filter(|p| p.side == side).count()
    }
}
