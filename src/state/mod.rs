/// State management module
///
/// This module handles all gallery state, including:
/// - Normalized manifest records and filters (data.rs)
/// - Items, filter, query and the modal cursor (gallery.rs)
/// - The page location and its `open` deep-link parameter (location.rs)

pub mod data;
pub mod gallery;
pub mod location;

pub use data::{Filter, MediaItem};
pub use gallery::{Direction, GalleryState};
pub use location::Location;
