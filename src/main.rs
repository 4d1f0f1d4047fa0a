use clap::Parser;
use iced::keyboard::{self, key, Key};
use iced::widget::image::Handle;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{
    button, column, container, horizontal_space, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use reqwest::Client;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod embed;
mod error;
mod i18n;
mod net;
mod state;
mod ui;

use config::Config;
use controller::{GalleryController, LoadStatus, MediaSurface};
use net::media::Thumbnail;
use state::{Direction, Filter, MediaItem};
use ui::Slot;

/// Identifier of the scrollable holding the card grid
const GRID_ID: &str = "gallery-grid";

/// Main application state
struct Gallery {
    /// Items, filter, query, modal cursor and page location
    controller: GalleryController,
    /// Shared HTTP client (None when it couldn't be built)
    client: Option<Client>,
    /// Raw search box contents
    search: String,
    /// Thumbnails keyed by the item's `thumb` reference
    thumbnails: HashMap<String, Slot>,
    /// Full-size photos keyed by the item's `url` reference
    previews: HashMap<String, Slot>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Manifest fetch finished
    ManifestLoaded(Result<Vec<MediaItem>, String>),
    /// User clicked a filter pill
    FilterSelected(Filter),
    /// Search box text changed
    SearchChanged(String),
    /// User asked to view an item in the modal
    OpenItem(String),
    CloseModal,
    Step(Direction),
    /// Hand a (possibly relative) URL to the system browser
    OpenExternal(String),
    ThumbnailLoaded(String, Result<Thumbnail, String>),
    PreviewLoaded(String, Result<Vec<u8>, String>),
    /// Copy the current deep link to the clipboard
    CopyLink,
}

impl Gallery {
    /// Create the window state and start loading the manifest
    fn new(config: Config) -> (Self, Task<Message>) {
        let mut controller = GalleryController::new(config.location.clone());

        let setup = net::client(config.timeout())
            .and_then(|client| Ok((client, config.manifest_url()?)));

        let (client, task) = match setup {
            Ok((client, url)) => {
                let task = Task::perform(
                    net::manifest::fetch_manifest(client.clone(), url),
                    |result| Message::ManifestLoaded(result.map_err(|e| e.to_string())),
                );
                (Some(client), task)
            }
            Err(err) => {
                controller.fail(err.to_string());
                (None, Task::none())
            }
        };

        tracing::info!(location = %config.location, "gallery starting");

        (
            Gallery {
                controller,
                client,
                search: String::new(),
                thumbnails: HashMap::new(),
                previews: HashMap::new(),
            },
            task,
        )
    }

    fn title(&self) -> String {
        match self.controller.modal() {
            Some(modal) => format!("{} · Galería", modal.title),
            None => "Galería".to_string(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(Ok(items)) => {
                let restored = self.controller.load(items);

                let mut tasks = vec![self.fetch_thumbnails()];
                if let Some(position) = restored {
                    tasks.push(self.fetch_preview());
                    tasks.push(self.scroll_to(position));
                }
                Task::batch(tasks)
            }
            Message::ManifestLoaded(Err(err)) => {
                self.controller.fail(err);
                Task::none()
            }
            Message::FilterSelected(filter) => {
                self.controller.set_filter(filter);
                self.sync_previews();
                Task::none()
            }
            Message::SearchChanged(raw) => {
                self.controller.set_query(&raw);
                self.search = raw;
                self.sync_previews();
                Task::none()
            }
            Message::OpenItem(id) => {
                self.controller.open_by_id(&id);
                self.sync_previews();
                self.fetch_preview()
            }
            Message::CloseModal => {
                self.controller.close_modal();
                self.previews.clear();
                Task::none()
            }
            Message::Step(direction) => {
                self.controller.step(direction);
                self.sync_previews();
                self.fetch_preview()
            }
            Message::OpenExternal(reference) => {
                match self.controller.location().resolve(&reference) {
                    Ok(url) => {
                        if let Err(err) = open::that(url.as_str()) {
                            tracing::warn!(%url, error = %err, "could not open browser");
                        }
                    }
                    Err(err) => tracing::warn!(%reference, error = %err, "invalid link"),
                }
                Task::none()
            }
            Message::ThumbnailLoaded(key, result) => {
                let slot = match result {
                    Ok(thumb) => Slot::Ready(Handle::from_rgba(thumb.width, thumb.height, thumb.pixels)),
                    Err(err) => {
                        tracing::warn!(thumb = %key, error = %err, "thumbnail failed");
                        Slot::Failed
                    }
                };
                self.thumbnails.insert(key, slot);
                Task::none()
            }
            Message::PreviewLoaded(key, result) => {
                // The modal may have been closed meanwhile
                if !self.previews.contains_key(&key) {
                    return Task::none();
                }
                let slot = match result {
                    Ok(bytes) => Slot::Ready(Handle::from_bytes(bytes)),
                    Err(err) => {
                        tracing::warn!(url = %key, error = %err, "preview failed");
                        Slot::Failed
                    }
                };
                self.previews.insert(key, slot);
                Task::none()
            }
            Message::CopyLink => iced::clipboard::write(self.controller.location().to_string()),
        }
    }

    /// Start downloading every photo thumbnail not requested yet
    fn fetch_thumbnails(&mut self) -> Task<Message> {
        let Some(client) = &self.client else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for item in self.controller.state().items() {
            if item.is_video() || item.thumb.is_empty() || self.thumbnails.contains_key(&item.thumb) {
                continue;
            }

            let key = item.thumb.clone();
            match self.controller.location().resolve(&key) {
                Ok(url) => {
                    self.thumbnails.insert(key.clone(), Slot::Loading);
                    tasks.push(Task::perform(
                        net::media::load_thumbnail(client.clone(), url),
                        move |result| {
                            Message::ThumbnailLoaded(key.clone(), result.map_err(|e| e.to_string()))
                        },
                    ));
                }
                Err(err) => {
                    tracing::warn!(thumb = %key, error = %err, "invalid thumbnail reference");
                    self.thumbnails.insert(key, Slot::Failed);
                }
            }
        }

        tracing::debug!(count = tasks.len(), "requesting thumbnails");
        Task::batch(tasks)
    }

    /// Keep only the full-size photo of the open item; drop everything when
    /// the modal is closed or shows a video
    fn sync_previews(&mut self) {
        match self.controller.modal().map(|m| &m.media) {
            Some(MediaSurface::Image { src }) => self.previews.retain(|key, _| key == src),
            _ => self.previews.clear(),
        }
    }

    /// Start downloading the open photo, if it isn't already loaded
    fn fetch_preview(&mut self) -> Task<Message> {
        let Some(client) = &self.client else {
            return Task::none();
        };
        let Some(MediaSurface::Image { src }) = self.controller.modal().map(|m| &m.media) else {
            return Task::none();
        };
        if self.previews.contains_key(src) {
            return Task::none();
        }

        let key = src.clone();
        match self.controller.location().resolve(&key) {
            Ok(url) => {
                self.previews.insert(key.clone(), Slot::Loading);
                Task::perform(net::media::load_preview(client.clone(), url), move |result| {
                    Message::PreviewLoaded(key.clone(), result.map_err(|e| e.to_string()))
                })
            }
            Err(err) => {
                tracing::warn!(url = %key, error = %err, "invalid photo reference");
                self.previews.insert(key, Slot::Failed);
                Task::none()
            }
        }
    }

    /// Bring a card of the grid into view
    fn scroll_to(&self, position: usize) -> Task<Message> {
        let total = self.controller.state().filtered_len();
        let y = if total > 1 {
            position as f32 / (total - 1) as f32
        } else {
            0.0
        };
        scrollable::snap_to(scrollable::Id::new(GRID_ID), RelativeOffset { x: 0.0, y })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let failure = match self.controller.status() {
            LoadStatus::Failed(detail) => Some(detail.as_str()),
            _ => None,
        };

        let header = column![
            text("Galería").size(36),
            ui::grid::filter_bar(self.controller.filter()),
            text_input(i18n::SEARCH_PLACEHOLDER, &self.search)
                .on_input(Message::SearchChanged)
                .padding(10),
        ]
        .spacing(16);

        let grid = scrollable(
            container(ui::grid::view(self.controller.grid(), failure, &self.thumbnails))
                .width(Length::Fill)
                .padding([0, 4]),
        )
        .id(scrollable::Id::new(GRID_ID))
        .height(Length::Fill);

        let footer = row![
            text(self.controller.location().to_string()).size(12),
            horizontal_space(),
            button(text(i18n::COPY_LINK).size(12))
                .style(button::text)
                .on_press(Message::CopyLink),
        ]
        .align_y(Alignment::Center);

        let base: Element<Message> = container(column![header, grid, footer].spacing(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(24)
            .into();

        match self.controller.modal() {
            Some(modal) => {
                let preview = match &modal.media {
                    MediaSurface::Image { src } => self.previews.get(src),
                    MediaSurface::Embed { .. } => None,
                };
                ui::modal::overlay(base, modal, preview)
            }
            None => base,
        }
    }

    /// Escape closes the modal; arrows step through it
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            Key::Named(key::Named::Escape) => Some(Message::CloseModal),
            Key::Named(key::Named::ArrowLeft) => Some(Message::Step(Direction::Previous)),
            Key::Named(key::Named::ArrowRight) => Some(Message::Step(Direction::Next)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();

    iced::application(Gallery::title, Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .centered()
        .run_with(move || Gallery::new(config))
}
