use iced::widget::{
    button, center, column, container, image, mouse_area, row, text, Column, Row,
};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;
use std::collections::HashMap;

use super::Slot;
use crate::controller::{CardView, GridView};
use crate::i18n;
use crate::state::Filter;
use crate::Message;

const CARD_WIDTH: f32 = 280.0;
const MEDIA_HEIGHT: f32 = 190.0;

/// Filters offered as pills: "all" first, then the known categories
fn pill_filters() -> Vec<Filter> {
    std::iter::once("all")
        .chain(i18n::CATEGORIES)
        .map(Filter::from_token)
        .collect()
}

/// Mutually exclusive category pills; the active one is highlighted
pub fn filter_bar<'a>(active: &Filter) -> Element<'a, Message> {
    let pills = pill_filters().into_iter().map(|filter| {
        let style: fn(&Theme, button::Status) -> button::Style = if &filter == active {
            button::primary
        } else {
            button::secondary
        };

        button(text(i18n::filter_label(&filter).to_string()))
            .style(style)
            .padding([6, 14])
            .on_press(Message::FilterSelected(filter))
            .into()
    });

    Row::with_children(pills).spacing(8).into()
}

/// The grid area: cards, or a single placeholder line
pub fn view<'a>(
    grid: &'a GridView,
    failure: Option<&'a str>,
    thumbnails: &'a HashMap<String, Slot>,
) -> Element<'a, Message> {
    match grid {
        GridView::Loading => notice(i18n::LOADING),
        GridView::Empty => notice(i18n::NO_CONTENT),
        GridView::Failed => {
            let mut content = Column::new().spacing(6).push(text(i18n::LOAD_FAILED).size(16));
            if let Some(detail) = failure {
                content = content.push(text(detail).size(12));
            }
            container(content).padding(10).into()
        }
        GridView::Cards(cards) => {
            let cards = cards.iter().map(|c| card(c, thumbnails)).collect();
            Wrap::with_elements(cards)
                .spacing(16.0)
                .line_spacing(16.0)
                .into()
        }
    }
}

fn notice<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(16)).padding(10).into()
}

fn card<'a>(card: &'a CardView, thumbnails: &'a HashMap<String, Slot>) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match (&card.thumb, card.is_video) {
        (_, true) => center(text("▶").size(48)).into(),
        (Some(thumb), false) => match thumbnails.get(thumb) {
            Some(Slot::Ready(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            Some(Slot::Failed) => center(text(i18n::NO_PREVIEW).size(13)).into(),
            Some(Slot::Loading) | None => center(text(i18n::LOADING).size(13)).into(),
        },
        (None, false) => center(text(i18n::NO_PREVIEW).size(13)).into(),
    };

    let media = mouse_area(
        container(preview)
            .width(Length::Fill)
            .height(Length::Fixed(MEDIA_HEIGHT)),
    )
    .on_press(Message::OpenItem(card.id.clone()));

    let badges = row![
        text(card.category_label.as_str()).size(12),
        text(card.type_label.as_str()).size(12),
    ]
    .spacing(8);

    let buttons = row![
        button(text(i18n::VIEW))
            .style(button::primary)
            .on_press(Message::OpenItem(card.id.clone())),
        button(text(i18n::OPEN))
            .style(button::secondary)
            .on_press(Message::OpenExternal(card.url.clone())),
    ]
    .spacing(8);

    let body = column![
        badges,
        text(card.title.as_str()).size(18),
        text(card.description.as_str()).size(14),
        buttons,
    ]
    .spacing(8)
    .padding(12);

    container(column![media, body].align_x(Alignment::Start))
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pills_start_with_all() {
        assert_eq!(
            pill_filters(),
            vec![
                Filter::All,
                Filter::Category("bodas".to_string()),
                Filter::Category("pre-bodas".to_string()),
                Filter::Category("sesiones-fotograficas".to_string()),
            ]
        );
    }
}
