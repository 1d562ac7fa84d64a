//! The saved plants, shown as cards

use std::collections::HashMap;

use iced::widget::{column, text};
use iced::{Element, Task};
use plant_catalog::{CatalogClient, PlantId};
use plant_store::FavoritesStore;
use tracing::debug;

use crate::card::{self, PlantCard};
use crate::search::card_grid;
use crate::token::Token;

#[derive(Debug, Clone)]
pub enum Message {
    Card(Token, card::Message),
}

#[derive(Debug, Default)]
pub struct FavoritesView {
    cards: Vec<PlantCard>,
}

impl FavoritesView {
    /// Build the view from what the store holds now
    pub fn new(store: &FavoritesStore, client: &CatalogClient) -> (Self, Task<Message>) {
        let mut view = Self::default();
        let task = view.refresh(store, client);
        (view, task)
    }

    pub fn cards(&self) -> &[PlantCard] {
        &self.cards
    }

    /// Re-read the store and reconcile the cards by plant id
    ///
    /// Cards for plants still in the store keep their state; removed plants
    /// lose their card and new ones get a fresh card.
    pub fn refresh(&mut self, store: &FavoritesStore, client: &CatalogClient) -> Task<Message> {
        let mut existing: HashMap<PlantId, PlantCard> = self
            .cards
            .drain(..)
            .map(|card| (card.plant().id, card))
            .collect();
        let mut tasks = Vec::new();

        self.cards = store
            .get_all()
            .into_iter()
            .map(|plant| match existing.remove(&plant.id) {
                Some(card) => card,
                None => {
                    let (card, task) = PlantCard::new(plant, store, client);
                    let key = card.key();
                    tasks.push(task.map(move |message| Message::Card(key, message)));
                    card
                }
            })
            .collect();

        debug!(count = self.cards.len(), "refreshed favorites");
        Task::batch(tasks)
    }

    pub fn update(
        &mut self,
        message: Message,
        client: &CatalogClient,
        store: &mut FavoritesStore,
    ) -> Task<Message> {
        let Message::Card(key, message) = message;
        let Some(card) = self.cards.iter_mut().find(|card| card.key() == key) else {
            return Task::none();
        };

        let (task, event) = card.update(message, client, store);
        let task = task.map(move |message| Message::Card(key, message));

        match event {
            Some(card::Event::FavoriteChanged { .. }) => {
                Task::batch([task, self.refresh(store, client)])
            }
            None => task,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let heading = text(heading(self.cards.len())).size(24);

        let body: Element<'_, Message> = if self.cards.is_empty() {
            column![
                text("No favorites yet").size(18),
                text("Search for plants and click the heart icon to add them here").size(14),
            ]
            .spacing(4)
            .into()
        } else {
            card_grid(&self.cards, Message::Card)
        };

        column![heading, body].spacing(20).into()
    }
}

pub fn heading(count: usize) -> String {
    format!("Your Favorite Plants ({count})")
}

#[cfg(test)]
mod tests {
    use plant_catalog::PlantSummary;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::card::Face;
    use crate::test_support::{catalog_client, memory_store};

    fn ids(view: &FavoritesView) -> Vec<PlantId> {
        view.cards().iter().map(|card| card.plant().id).collect()
    }

    #[test]
    fn empty_store_shows_no_cards() {
        let store = memory_store();
        let (view, _) = FavoritesView::new(&store, &catalog_client());

        assert!(view.cards().is_empty());
        assert_eq!(heading(view.cards().len()), "Your Favorite Plants (0)");
    }

    #[test]
    fn cards_follow_store_order_and_are_favorites() {
        let mut store = memory_store();
        store.add(&PlantSummary::new(3, "Fern")).unwrap();
        store.add(&PlantSummary::new(1, "Rose")).unwrap();

        let (view, _) = FavoritesView::new(&store, &catalog_client());

        assert_eq!(ids(&view), vec![PlantId(3), PlantId(1)]);
        assert!(view.cards().iter().all(PlantCard::is_favorite));
    }

    #[test]
    fn unfavoriting_removes_the_card() {
        let mut store = memory_store();
        let client = catalog_client();
        store.add(&PlantSummary::new(3, "Fern")).unwrap();
        store.add(&PlantSummary::new(1, "Rose")).unwrap();
        let (mut view, _) = FavoritesView::new(&store, &client);

        let key = view.cards()[0].key();
        let _task = view.update(
            Message::Card(key, card::Message::ToggleFavorite),
            &client,
            &mut store,
        );

        assert_eq!(ids(&view), vec![PlantId(1)]);
        assert!(!store.contains(PlantId(3)));
        assert_eq!(heading(view.cards().len()), "Your Favorite Plants (1)");
    }

    #[test]
    fn refresh_keeps_state_of_remaining_cards() {
        let mut store = memory_store();
        let client = catalog_client();
        store.add(&PlantSummary::new(1, "Rose")).unwrap();
        let (mut view, _) = FavoritesView::new(&store, &client);

        let key = view.cards()[0].key();
        let _task = view.update(
            Message::Card(key, card::Message::ShowDetails),
            &client,
            &mut store,
        );

        store.add(&PlantSummary::new(2, "Tulip")).unwrap();
        let _task = view.refresh(&store, &client);

        assert_eq!(ids(&view), vec![PlantId(1), PlantId(2)]);
        assert_eq!(view.cards()[0].key(), key);
        assert_eq!(view.cards()[0].face(), Face::Detail);
        assert_eq!(view.cards()[1].face(), Face::Summary);
    }

    #[test]
    fn messages_for_unknown_cards_are_ignored() {
        let mut store = memory_store();
        store.add(&PlantSummary::new(1, "Rose")).unwrap();
        let client = catalog_client();
        let (mut view, _) = FavoritesView::new(&store, &client);

        let _task = view.update(
            Message::Card(Token::next(), card::Message::ToggleFavorite),
            &client,
            &mut store,
        );

        assert!(store.contains(PlantId(1)));
        assert_eq!(view.cards().len(), 1);
    }
}
