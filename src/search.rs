//! Query the catalog and show the matches as cards

use iced::widget::{Column, Row, button, column, row, text, text_input};
use iced::{Alignment, Element, Length, Task};
use plant_catalog::{CatalogClient, CatalogError, ClientTrait, SearchPage};
use plant_store::FavoritesStore;
use tracing::{debug, info, warn};

use crate::card::{self, PlantCard};
use crate::token::Token;

pub const SEARCH_FAILED: &str = "Failed to search plants. Please try again.";
pub const PLACEHOLDER: &str = "Search for a plant (e.g., rose, fern, cactus)...";

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    ClearQuery,
    Submit,
    ClearResults,
    SearchCompleted {
        request: Token,
        result: Result<SearchPage, CatalogError>,
    },
    Card(Token, card::Message),
}

/// What the results area shows, highest priority first
#[derive(Debug)]
pub enum Status<'a> {
    Failed(&'a str),
    Searching,
    NoResults(&'a str),
    Results(&'a [PlantCard]),
    Idle,
}

#[derive(Debug, Default)]
pub struct SearchView {
    query: String,
    /// Trimmed query of the last submission
    submitted: String,
    cards: Vec<PlantCard>,
    /// Only the response to this request is applied
    pending: Option<Token>,
    error: Option<String>,
    has_searched: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cards(&self) -> &[PlantCard] {
        &self.cards
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn pending_request(&self) -> Option<Token> {
        self.pending
    }

    pub fn status(&self) -> Status<'_> {
        if let Some(error) = &self.error {
            Status::Failed(error)
        } else if self.pending.is_some() {
            Status::Searching
        } else if !self.cards.is_empty() {
            Status::Results(&self.cards)
        } else if self.has_searched {
            Status::NoResults(&self.submitted)
        } else {
            Status::Idle
        }
    }

    pub fn update(
        &mut self,
        message: Message,
        client: &CatalogClient,
        store: &mut FavoritesStore,
    ) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Task::none()
            }

            Message::ClearQuery => {
                self.query.clear();
                Task::none()
            }

            Message::Submit => {
                let query = self.query.trim();
                if query.is_empty() {
                    return Task::none();
                }

                let request = Token::next();
                self.submitted = query.to_string();
                self.pending = Some(request);
                self.error = None;
                self.has_searched = true;
                info!(query = %self.submitted, "searching plants");

                let client = client.clone();
                let query = self.submitted.clone();
                Task::perform(async move { client.search(&query).await }, move |result| {
                    Message::SearchCompleted { request, result }
                })
            }

            Message::ClearResults => {
                *self = Self::default();
                Task::none()
            }

            Message::SearchCompleted { request, result } => {
                if self.pending != Some(request) {
                    debug!("dropping response to a superseded search");
                    return Task::none();
                }
                self.pending = None;

                match result {
                    Ok(page) => {
                        debug!(count = page.data.len(), "search completed");
                        let (cards, tasks): (Vec<_>, Vec<_>) = page
                            .data
                            .into_iter()
                            .map(|plant| {
                                let (card, task) = PlantCard::new(plant, store, client);
                                let key = card.key();
                                (card, task.map(move |message| Message::Card(key, message)))
                            })
                            .unzip();
                        self.cards = cards;
                        Task::batch(tasks)
                    }
                    Err(err) => {
                        warn!(%err, "search failed");
                        self.error = Some(SEARCH_FAILED.to_string());
                        self.cards.clear();
                        Task::none()
                    }
                }
            }

            Message::Card(key, message) => {
                let Some(card) = self.cards.iter_mut().find(|card| card.key() == key) else {
                    return Task::none();
                };
                let (task, _) = card.update(message, client, store);
                task.map(move |message| Message::Card(key, message))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let searching = self.pending.is_some();

        let mut controls = row![
            text_input(PLACEHOLDER, &self.query)
                .on_input(Message::QueryChanged)
                .on_submit(Message::Submit)
                .padding(10)
                .width(Length::Fill),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        if !self.query.is_empty() {
            controls = controls.push(
                button("✕")
                    .on_press(Message::ClearQuery)
                    .style(button::text),
            );
        }

        controls = controls.push(
            button(if searching { "Searching..." } else { "Search" })
                .padding(10)
                .on_press_maybe((!searching).then_some(Message::Submit)),
        );

        let mut content = Column::new().spacing(20).push(controls);

        if self.has_searched {
            content = content.push(
                button("Clear Results")
                    .style(button::secondary)
                    .on_press(Message::ClearResults),
            );
        }

        let results: Element<'_, Message> = match self.status() {
            Status::Failed(error) => text(error).style(text::danger).into(),
            Status::Searching => text("Searching...").into(),
            Status::NoResults(query) => column![
                text(no_results_message(query)).size(18),
                text("Try a different search term").size(14),
            ]
            .spacing(4)
            .into(),
            Status::Results(cards) => card_grid(cards, Message::Card),
            Status::Idle => text("Search for a plant to get started").size(16).into(),
        };

        content.push(results).into()
    }
}

pub fn no_results_message(query: &str) -> String {
    format!("No plants found for \"{query}\"")
}

/// Wrapping grid of cards, routing each card's messages through `on_card`
pub fn card_grid<'a, M: 'a>(
    cards: &'a [PlantCard],
    on_card: fn(Token, card::Message) -> M,
) -> Element<'a, M> {
    Row::with_children(cards.iter().map(|card| {
        let key = card.key();
        card.view().map(move |message| on_card(key, message))
    }))
    .spacing(24)
    .wrap()
    .vertical_spacing(24)
    .into()
}

#[cfg(test)]
mod tests {
    use plant_catalog::{PlantId, PlantSummary};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{catalog_client, memory_store};

    fn page(plants: &[(u64, &str)]) -> SearchPage {
        SearchPage {
            data: plants
                .iter()
                .map(|(id, name)| PlantSummary::new(*id, *name))
                .collect(),
            ..Default::default()
        }
    }

    fn submit(view: &mut SearchView, query: &str, store: &mut FavoritesStore) -> Token {
        let client = catalog_client();
        let _task = view.update(Message::QueryChanged(query.to_string()), &client, store);
        let _task = view.update(Message::Submit, &client, store);
        view.pending_request().expect("search should be pending")
    }

    fn complete(
        view: &mut SearchView,
        request: Token,
        result: Result<SearchPage, CatalogError>,
        store: &mut FavoritesStore,
    ) {
        let _task = view.update(
            Message::SearchCompleted { request, result },
            &catalog_client(),
            store,
        );
    }

    #[test]
    fn starts_idle() {
        let view = SearchView::new();

        assert!(matches!(view.status(), Status::Idle));
        assert!(!view.has_searched());
    }

    #[test]
    fn blank_query_is_not_submitted() {
        let mut store = memory_store();
        let mut view = SearchView::new();
        let client = catalog_client();

        let _task = view.update(Message::QueryChanged("   ".to_string()), &client, &mut store);
        let _task = view.update(Message::Submit, &client, &mut store);

        assert_eq!(view.pending_request(), None);
        assert!(!view.has_searched());
        assert!(matches!(view.status(), Status::Idle));
    }

    #[test]
    fn matches_become_cards() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let request = submit(&mut view, "rose", &mut store);
        assert!(matches!(view.status(), Status::Searching));

        complete(
            &mut view,
            request,
            Ok(page(&[(1, "Rose"), (2, "Wild Rose")])),
            &mut store,
        );

        let Status::Results(cards) = view.status() else {
            panic!("expected results, got {:?}", view.status());
        };
        let names: Vec<&str> = cards.iter().map(|card| card.plant().common_name.as_str()).collect();
        assert_eq!(names, vec!["Rose", "Wild Rose"]);
        assert_eq!(view.pending_request(), None);
    }

    #[test]
    fn empty_result_names_the_submitted_query() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let request = submit(&mut view, "  zzz_nonexistent ", &mut store);
        let _task = view.update(
            Message::QueryChanged("edited afterwards".to_string()),
            &catalog_client(),
            &mut store,
        );
        complete(&mut view, request, Ok(SearchPage::default()), &mut store);

        let Status::NoResults(query) = view.status() else {
            panic!("expected no results, got {:?}", view.status());
        };
        assert_eq!(query, "zzz_nonexistent");
        assert_eq!(
            no_results_message(query),
            "No plants found for \"zzz_nonexistent\""
        );
    }

    #[test]
    fn failure_shows_message_and_clears_cards() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let request = submit(&mut view, "rose", &mut store);
        complete(&mut view, request, Ok(page(&[(1, "Rose")])), &mut store);

        let request = submit(&mut view, "fern", &mut store);
        complete(
            &mut view,
            request,
            Err(CatalogError::FetchFailed {
                operation: "plants",
                reason: "catalog returned status 500".to_string(),
            }),
            &mut store,
        );

        assert!(matches!(view.status(), Status::Failed(SEARCH_FAILED)));
        assert!(view.cards().is_empty());
        assert!(view.has_searched());
    }

    #[test]
    fn only_latest_search_is_applied() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let first = submit(&mut view, "rose", &mut store);
        let second = submit(&mut view, "fern", &mut store);
        assert_ne!(first, second);

        complete(&mut view, first, Ok(page(&[(1, "Rose")])), &mut store);
        assert!(matches!(view.status(), Status::Searching));

        complete(&mut view, second, Ok(page(&[(3, "Fern")])), &mut store);
        assert_eq!(view.cards().len(), 1);
        assert_eq!(view.cards()[0].plant().id, PlantId(3));
    }

    #[test]
    fn clear_results_resets_and_drops_pending_search() {
        let mut store = memory_store();
        let mut view = SearchView::new();
        let client = catalog_client();

        let request = submit(&mut view, "rose", &mut store);
        let _task = view.update(Message::ClearResults, &client, &mut store);

        assert_eq!(view.query(), "");
        assert!(!view.has_searched());
        assert!(matches!(view.status(), Status::Idle));

        complete(&mut view, request, Ok(page(&[(1, "Rose")])), &mut store);
        assert!(view.cards().is_empty());
    }

    #[test]
    fn clear_query_keeps_results() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let request = submit(&mut view, "rose", &mut store);
        complete(&mut view, request, Ok(page(&[(1, "Rose")])), &mut store);
        let _task = view.update(Message::ClearQuery, &catalog_client(), &mut store);

        assert_eq!(view.query(), "");
        assert_eq!(view.cards().len(), 1);
    }

    #[test]
    fn card_messages_reach_the_store() {
        let mut store = memory_store();
        let mut view = SearchView::new();

        let request = submit(&mut view, "boxwood", &mut store);
        complete(&mut view, request, Ok(page(&[(5, "Boxwood")])), &mut store);

        let key = view.cards()[0].key();
        let _task = view.update(
            Message::Card(key, card::Message::ToggleFavorite),
            &catalog_client(),
            &mut store,
        );

        assert!(store.contains(PlantId(5)));
        assert!(view.cards()[0].is_favorite());
    }

    #[test]
    fn results_reflect_existing_favorites() {
        let mut store = memory_store();
        store.add(&PlantSummary::new(2, "Wild Rose")).unwrap();
        let mut view = SearchView::new();

        let request = submit(&mut view, "rose", &mut store);
        complete(
            &mut view,
            request,
            Ok(page(&[(1, "Rose"), (2, "Wild Rose")])),
            &mut store,
        );

        let flags: Vec<bool> = view.cards().iter().map(PlantCard::is_favorite).collect();
        assert_eq!(flags, vec![false, true]);
    }
}
