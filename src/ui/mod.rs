/// Widget builders for the gallery window
///
/// - `grid.rs` - filter pills, card grid and its placeholders
/// - `modal.rs` - the full-view overlay for the active item

pub mod grid;
pub mod modal;

use iced::widget::image::Handle;

/// Download state of a thumbnail or preview image
#[derive(Debug, Clone)]
pub enum Slot {
    Loading,
    Ready(Handle),
    Failed,
}
