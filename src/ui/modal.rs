use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack,
    text,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use super::Slot;
use crate::controller::{MediaSurface, ModalView};
use crate::i18n;
use crate::state::Direction;
use crate::Message;

const DIALOG_WIDTH: f32 = 900.0;
const MEDIA_HEIGHT: f32 = 540.0;

/// Lay the modal over `base`. Clicking the backdrop closes it.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    modal: &'a ModalView,
    preview: Option<&'a Slot>,
) -> Element<'a, Message> {
    let media: Element<'a, Message> = match &modal.media {
        MediaSurface::Image { .. } => match preview {
            Some(Slot::Ready(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(MEDIA_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into(),
            Some(Slot::Failed) => center(text(i18n::NO_PREVIEW))
                .height(Length::Fixed(MEDIA_HEIGHT))
                .into(),
            Some(Slot::Loading) | None => center(text(i18n::LOADING))
                .height(Length::Fixed(MEDIA_HEIGHT))
                .into(),
        },
        // No embedded browser: hand the player URL to the system browser
        MediaSurface::Embed { src } => center(
            column![
                text("▶").size(64),
                text(src.as_str()).size(13),
                button(text(i18n::PLAY))
                    .style(button::primary)
                    .on_press(Message::OpenExternal(src.clone())),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .height(Length::Fixed(MEDIA_HEIGHT))
        .into(),
    };

    let controls = row![
        button(text(i18n::PREVIOUS))
            .on_press_maybe(modal.has_previous().then_some(Message::Step(Direction::Previous))),
        text(format!("{} / {}", modal.position + 1, modal.total)).size(14),
        button(text(i18n::NEXT))
            .on_press_maybe(modal.has_next().then_some(Message::Step(Direction::Next))),
        horizontal_space(),
        button(text(i18n::CLOSE))
            .style(button::secondary)
            .on_press(Message::CloseModal),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let dialog = container(
        column![
            media,
            text(modal.title.as_str()).size(24),
            text(modal.description.as_str()).size(15),
            text(modal.meta.as_str()).size(13),
            controls,
        ]
        .spacing(12),
    )
    .width(Length::Fixed(DIALOG_WIDTH))
    .padding(20)
    .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme| container::Style {
                background: Some(Color { a: 0.8, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(Message::CloseModal)
        )
    ]
    .into()
}
