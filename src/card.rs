//! A two-faced card for one plant
//!
//! The summary face shows what the search returned; the detail face shows
//! the extended record, fetched the first time it is asked for and kept
//! for the life of the card.

use std::fmt;

use iced::widget::{Column, button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length, Task, Theme};
use plant_catalog::{CatalogClient, CatalogError, ClientTrait, PlantDetails, PlantId, PlantSummary};
use plant_store::FavoritesStore;
use tracing::{debug, warn};

use crate::token::Token;

/// Placeholder for a missing value
pub const UNKNOWN: &str = "Unknown";

const CARD_WIDTH: f32 = 260.0;
const CARD_HEIGHT: f32 = 380.0;
const IMAGE_HEIGHT: f32 = 160.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Summary,
    Detail,
}

/// Progress of the one details fetch a card may make
///
/// `Loaded` and `Failed` are final.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    NotRequested,
    Loading,
    Loaded(PlantDetails),
    Failed,
}

#[derive(Debug, Clone)]
pub enum Thumbnail {
    Missing,
    Loading,
    Loaded(image::Handle),
    Failed,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleFavorite,
    ShowDetails,
    ShowSummary,
    DetailsFetched(Result<PlantDetails, CatalogError>),
    ThumbnailFetched(Result<image::Handle, CatalogError>),
}

/// Notification for the view that owns the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    FavoriteChanged { id: PlantId, favorite: bool },
}

#[derive(Debug)]
pub struct PlantCard {
    key: Token,
    plant: PlantSummary,
    favorite: bool,
    face: Face,
    details: DetailStatus,
    thumbnail: Thumbnail,
}

impl PlantCard {
    /// Create a card showing its summary face
    ///
    /// The favorite flag is read from the store; the image download starts
    /// right away if the plant has one.
    pub fn new(
        plant: PlantSummary,
        store: &FavoritesStore,
        client: &CatalogClient,
    ) -> (Self, Task<Message>) {
        let favorite = store.contains(plant.id);

        let (thumbnail, task) = match plant.image_url() {
            Some(url) => {
                let client = client.clone();
                let url = url.to_string();
                let task = Task::perform(async move { client.image(&url).await }, |result| {
                    Message::ThumbnailFetched(result.map(image::Handle::from_bytes))
                });
                (Thumbnail::Loading, task)
            }
            None => (Thumbnail::Missing, Task::none()),
        };

        let card = Self {
            key: Token::next(),
            plant,
            favorite,
            face: Face::Summary,
            details: DetailStatus::NotRequested,
            thumbnail,
        };
        (card, task)
    }

    pub fn key(&self) -> Token {
        self.key
    }

    pub fn plant(&self) -> &PlantSummary {
        &self.plant
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn detail_status(&self) -> &DetailStatus {
        &self.details
    }

    pub fn update(
        &mut self,
        message: Message,
        client: &CatalogClient,
        store: &mut FavoritesStore,
    ) -> (Task<Message>, Option<Event>) {
        match message {
            Message::ToggleFavorite => {
                self.favorite = !self.favorite;
                let saved = if self.favorite {
                    store.add(&self.plant)
                } else {
                    store.remove(self.plant.id)
                };
                if let Err(err) = saved {
                    warn!(%err, id = %self.plant.id, "failed to save favorite");
                }

                let event = Event::FavoriteChanged {
                    id: self.plant.id,
                    favorite: self.favorite,
                };
                (Task::none(), Some(event))
            }

            Message::ShowDetails => {
                self.face = Face::Detail;
                if !matches!(self.details, DetailStatus::NotRequested) {
                    return (Task::none(), None);
                }

                self.details = DetailStatus::Loading;
                let client = client.clone();
                let id = self.plant.id;
                debug!(%id, "fetching plant details");

                let task = Task::perform(
                    async move { client.details(id).await },
                    Message::DetailsFetched,
                );
                (task, None)
            }

            Message::ShowSummary => {
                self.face = Face::Summary;
                (Task::none(), None)
            }

            Message::DetailsFetched(result) => {
                if !matches!(self.details, DetailStatus::Loading) {
                    return (Task::none(), None);
                }

                self.details = match result {
                    Ok(details) => DetailStatus::Loaded(details),
                    Err(err) => {
                        warn!(%err, id = %self.plant.id, "failed to fetch plant details");
                        DetailStatus::Failed
                    }
                };
                (Task::none(), None)
            }

            Message::ThumbnailFetched(result) => {
                self.thumbnail = match result {
                    Ok(handle) => Thumbnail::Loaded(handle),
                    Err(err) => {
                        debug!(%err, id = %self.plant.id, "no thumbnail");
                        Thumbnail::Failed
                    }
                };
                (Task::none(), None)
            }
        }
    }

    /// Text shown in place of the image, `None` once the image is loaded
    pub fn image_caption(&self) -> Option<&'static str> {
        match self.thumbnail {
            Thumbnail::Loaded(_) => None,
            Thumbnail::Loading => Some("Loading image..."),
            Thumbnail::Missing | Thumbnail::Failed => Some("No image available"),
        }
    }

    /// First scientific name, the card's subtitle
    pub fn species(&self) -> &str {
        self.plant
            .scientific_name
            .first()
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unknown species")
    }

    pub fn summary_lines(&self) -> Vec<DetailLine> {
        vec![
            DetailLine::text("Cycle", or_unknown(&self.plant.cycle)),
            DetailLine::text("Watering", or_unknown(&self.plant.watering)),
            DetailLine::text("Sunlight", join_or_unknown(&self.plant.sunlight)),
        ]
    }

    /// What the detail face shows in its current state
    pub fn detail_pane(&self) -> DetailPane {
        match &self.details {
            DetailStatus::NotRequested | DetailStatus::Loading => DetailPane::Loading,
            DetailStatus::Failed => DetailPane::Failed,
            DetailStatus::Loaded(details) => DetailPane::Loaded(detail_lines(details)),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body = match self.face {
            Face::Summary => self.summary_face(),
            Face::Detail => self.detail_face(),
        };

        container(body)
            .padding(12)
            .width(CARD_WIDTH)
            .height(CARD_HEIGHT)
            .style(container::rounded_box)
            .into()
    }

    fn header(&self) -> Element<'_, Message> {
        let heart = if self.favorite { "♥" } else { "♡" };

        row![
            text(&self.plant.common_name).size(18).width(Length::Fill),
            button(text(heart).size(20))
                .on_press(Message::ToggleFavorite)
                .style(button::text),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }

    fn summary_face(&self) -> Element<'_, Message> {
        let picture: Element<'_, Message> = match &self.thumbnail {
            Thumbnail::Loaded(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(IMAGE_HEIGHT)
                .content_fit(ContentFit::Cover)
                .into(),
            Thumbnail::Loading | Thumbnail::Missing | Thumbnail::Failed => {
                image_placeholder(self.image_caption().unwrap_or_default())
            }
        };

        let lines = Column::with_children(self.summary_lines().into_iter().map(line_view)).spacing(4);

        column![
            picture,
            self.header(),
            text(self.species()).size(14),
            container(lines).height(Length::Fill),
            button("More Info")
                .width(Length::Fill)
                .on_press(Message::ShowDetails),
        ]
        .spacing(8)
        .into()
    }

    fn detail_face(&self) -> Element<'_, Message> {
        let pane: Element<'_, Message> = match self.detail_pane() {
            DetailPane::Loading => text("Loading details...").into(),
            DetailPane::Failed => text("Failed to load details").style(text::danger).into(),
            DetailPane::Loaded(lines) => Column::with_children(lines.into_iter().map(line_view))
                .spacing(6)
                .into(),
        };

        column![
            self.header(),
            container(pane).height(Length::Fill),
            button("Back")
                .width(Length::Fill)
                .style(button::secondary)
                .on_press(Message::ShowSummary),
        ]
        .spacing(12)
        .into()
    }
}

fn image_placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .center_x(Length::Fill)
        .center_y(IMAGE_HEIGHT)
        .into()
}

fn line_view<'a>(line: DetailLine) -> Element<'a, Message> {
    match line.value {
        LineValue::Text(value) => text(format!("{}: {}", line.label, value)).size(14).into(),
        LineValue::Flag(flag) => {
            let style: fn(&Theme) -> text::Style = if flag { text::success } else { text::danger };
            row![
                text(format!("{}:", line.label)).size(14),
                text(check_mark(flag)).size(14).style(style),
            ]
            .spacing(6)
            .into()
        }
    }
}

/// Content of the detail face
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane {
    Loading,
    Failed,
    Loaded(Vec<DetailLine>),
}

/// One labelled row of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: LineValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineValue {
    Text(String),
    Flag(bool),
}

impl DetailLine {
    fn text(label: &'static str, value: String) -> Self {
        Self {
            label,
            value: LineValue::Text(value),
        }
    }

    fn flag(label: &'static str, value: bool) -> Self {
        Self {
            label,
            value: LineValue::Flag(value),
        }
    }
}

impl fmt::Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            LineValue::Text(value) => write!(f, "{}: {}", self.label, value),
            LineValue::Flag(flag) => write!(f, "{}: {}", self.label, check_mark(*flag)),
        }
    }
}

fn check_mark(flag: bool) -> &'static str {
    if flag { "✓" } else { "✗" }
}

fn detail_lines(details: &PlantDetails) -> Vec<DetailLine> {
    vec![
        DetailLine::text("Type", or_unknown(&details.plant_type)),
        DetailLine::flag("Edible", details.edible_leaf),
        DetailLine::flag("Medicinal", details.medicinal),
        DetailLine::flag("Indoor", details.indoor),
        DetailLine::text("Soil", join_or_unknown(&details.soil)),
        DetailLine::text("Watering", or_unknown(&details.watering)),
        DetailLine::text("Sunlight", join_or_unknown(&details.sunlight)),
        DetailLine::text("Pruning months", join_or_unknown(&details.pruning_month)),
    ]
}

/// The value, or [`UNKNOWN`] if it is blank
pub fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// The values joined in order, or [`UNKNOWN`] if there are none
pub fn join_or_unknown(values: &[String]) -> String {
    if values.is_empty() {
        UNKNOWN.to_string()
    } else {
        values.join(", ")
    }
}
