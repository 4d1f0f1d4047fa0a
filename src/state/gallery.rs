use super::data::{Filter, MediaItem};

/// Direction for modal navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Compute which items are visible for a filter and a normalized query.
///
/// Returns indices into `items`, in load order.
pub fn visible_indices(items: &[MediaItem], filter: &Filter, query: &str) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .filter(|(_, item)| query.is_empty() || item.haystack().contains(query))
        .map(|(index, _)| index)
        .collect()
}

/// Normalize raw search-box text into a query
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The gallery's in-memory state.
///
/// `items` is set once; `filtered` is derived from `items`, `filter` and
/// `query` on every render; `active` always indexes into `filtered`.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    items: Vec<MediaItem>,
    loaded: bool,
    filter: Filter,
    query: String,
    filtered: Vec<usize>,
    active: Option<usize>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the loaded items. Only the first call has an effect.
    ///
    /// Returns whether the items were accepted.
    pub fn set_items(&mut self, items: Vec<MediaItem>) -> bool {
        if self.loaded {
            return false;
        }
        self.items = items;
        self.loaded = true;
        true
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = normalize_query(raw);
    }

    /// Recompute `filtered`.
    ///
    /// If an item is active it stays active when still visible (its index
    /// is re-anchored); otherwise the cursor is cleared. Returns `true` when
    /// an active item was dropped by the recomputation.
    pub fn refresh(&mut self) -> bool {
        let active_item = self.active_item_index();
        self.filtered = visible_indices(&self.items, &self.filter, &self.query);

        match active_item {
            Some(item_index) => {
                self.active = self.filtered.iter().position(|&i| i == item_index);
                self.active.is_none()
            }
            None => false,
        }
    }

    /// Visible items in order
    pub fn filtered(&self) -> impl Iterator<Item = &MediaItem> + '_ {
        self.filtered.iter().map(move |&i| &self.items[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Position within `filtered` of an id. Duplicate ids resolve to the last one.
    pub fn position_in_filtered(&self, id: &str) -> Option<usize> {
        self.filtered
            .iter()
            .rposition(|&i| self.items[i].id == id)
    }

    /// Whether any loaded item (visible or not) has this id
    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&MediaItem> {
        self.active_item_index().map(|i| &self.items[i])
    }

    fn active_item_index(&self) -> Option<usize> {
        self.active.and_then(|pos| self.filtered.get(pos).copied())
    }

    /// Point the cursor at a position in `filtered`. Out-of-range positions are ignored.
    pub fn activate(&mut self, position: usize) -> bool {
        if position < self.filtered.len() {
            self.active = Some(position);
            true
        } else {
            false
        }
    }

    /// Move the cursor one step. No wrap-around: returns `false` and leaves
    /// the cursor untouched at the ends or when nothing is active.
    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(current) = self.active else {
            return false;
        };
        let Some(target) = current.checked_add_signed(direction.offset()) else {
            return false;
        };
        self.activate(target)
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }
}
