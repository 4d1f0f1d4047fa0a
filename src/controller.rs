//! Gallery controller: the single owner of gallery state and page location.
//!
//! Every user interaction goes through one of the operations here. Each
//! returns plain view models (`GridView`, `ModalView`) so the iced layer only
//! has to draw them.

use crate::embed::embed_url;
use crate::i18n;
use crate::state::{Direction, Filter, GalleryState, Location, MediaItem};

/// Progress of the one-time manifest load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Grid-visible summary of one item
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_label: String,
    pub type_label: String,
    pub is_video: bool,
    /// Preview image reference (photos only)
    pub thumb: Option<String>,
    /// Target opened by the "open" button
    pub url: String,
}

impl CardView {
    fn from_item(item: &MediaItem) -> Self {
        CardView {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            category_label: i18n::category_label(&item.category).to_string(),
            type_label: item.media_type.to_string(),
            is_video: item.is_video(),
            thumb: (!item.is_video() && !item.thumb.is_empty()).then(|| item.thumb.clone()),
            url: item.url.clone(),
        }
    }
}

/// What the grid area shows
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    Loading,
    Failed,
    /// Nothing matches the current filter and query
    Empty,
    Cards(Vec<CardView>),
}

/// What the modal's media area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSurface {
    /// A full-size photo
    Image { src: String },
    /// An embeddable player reference
    Embed { src: String },
}

/// Full view of the active item
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// "category • type • date"
    pub meta: String,
    pub media: MediaSurface,
    pub position: usize,
    pub total: usize,
}

impl ModalView {
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.total
    }
}

/// Owns the gallery state and keeps the page location in sync with it
#[derive(Debug)]
pub struct GalleryController {
    state: GalleryState,
    location: Location,
    status: LoadStatus,
    grid: GridView,
    modal: Option<ModalView>,
}

impl GalleryController {
    pub fn new(location: Location) -> Self {
        GalleryController {
            state: GalleryState::new(),
            location,
            status: LoadStatus::Loading,
            grid: GridView::Loading,
            modal: None,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn modal(&self) -> Option<&ModalView> {
        self.modal.as_ref()
    }

    pub fn filter(&self) -> &Filter {
        self.state.filter()
    }

    /// Accept the loaded manifest, render, and reopen a deep-linked item.
    ///
    /// Returns the grid position of a restored item so the caller can
    /// scroll it into view.
    pub fn load(&mut self, items: Vec<MediaItem>) -> Option<usize> {
        if !self.state.set_items(items) {
            tracing::warn!("gallery already loaded, ignoring new manifest");
            return None;
        }
        self.status = LoadStatus::Ready;
        self.render();
        self.restore_from_location()
    }

    /// Record a terminal load failure. No items will be available.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(error = %message, "failed to load gallery");
        self.status = LoadStatus::Failed(message);
        self.render();
    }

    /// Recompute the visible items and rebuild the grid
    pub fn render(&mut self) -> &GridView {
        if self.state.refresh() {
            tracing::debug!("open item is no longer visible, closing modal");
            self.close_modal();
        } else if self.modal.is_some() {
            // Position and neighbours may have shifted
            self.display_active();
        }

        self.grid = match &self.status {
            LoadStatus::Loading => GridView::Loading,
            LoadStatus::Failed(_) => GridView::Failed,
            LoadStatus::Ready if self.state.filtered_len() == 0 => GridView::Empty,
            LoadStatus::Ready => {
                GridView::Cards(self.state.filtered().map(CardView::from_item).collect())
            }
        };
        &self.grid
    }

    pub fn set_filter(&mut self, filter: Filter) -> &GridView {
        tracing::debug!(filter = filter.token(), "filter changed");
        self.state.set_filter(filter);
        self.render()
    }

    pub fn set_query(&mut self, raw: &str) -> &GridView {
        self.state.set_query(raw);
        self.render()
    }

    /// Open the modal on a visible item. Items outside the current filter
    /// and query are ignored.
    pub fn open_by_id(&mut self, id: &str) -> Option<&ModalView> {
        let Some(position) = self.state.position_in_filtered(id) else {
            tracing::debug!(id, "item not visible, not opening");
            return None;
        };

        self.state.activate(position);
        self.display_active();
        self.modal.as_ref()
    }

    /// Hide the modal, drop its media and clear the `open` parameter
    pub fn close_modal(&mut self) {
        self.state.deactivate();
        self.modal = None;
        self.location.replace_open(None);
    }

    /// Move to the previous or next visible item. No wrap-around.
    pub fn step(&mut self, direction: Direction) -> Option<&ModalView> {
        if self.modal.is_none() || !self.state.step(direction) {
            return None;
        }
        self.display_active();
        self.modal.as_ref()
    }

    /// Reopen the item named by the location's `open` parameter.
    ///
    /// The grid is rendered first so the lookup runs against the visible
    /// items. Returns the card position on success.
    pub fn restore_from_location(&mut self) -> Option<usize> {
        let id = self.location.open_param()?;
        if !self.state.contains_id(&id) {
            tracing::debug!(%id, "deep link names an unknown item");
            return None;
        }

        self.render();
        self.open_by_id(&id)?;
        tracing::info!(%id, "restored deep link");
        self.state.active()
    }

    fn display_active(&mut self) {
        let Some(item) = self.state.active_item() else {
            return;
        };

        let media = if item.is_video() {
            MediaSurface::Embed { src: embed_url(&item.url) }
        } else {
            MediaSurface::Image { src: item.url.clone() }
        };

        let modal = ModalView {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            meta: format!(
                "{} • {} • {}",
                i18n::category_label(&item.category),
                item.media_type,
                i18n::short_date(&item.created_at)
            ),
            media,
            position: self.state.active().unwrap_or_default(),
            total: self.state.filtered_len(),
        };

        self.location.replace_open(Some(&modal.id));
        self.modal = Some(modal);
    }
}
