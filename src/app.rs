//! Application shell: header, tab bar and the active view

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use plant_catalog::CatalogClient;
use plant_store::FavoritesStore;
use tracing::debug;

use crate::favorites::{self, FavoritesView};
use crate::search::{self, SearchView};

pub const TITLE: &str = "Plant Favorites";
pub const TAGLINE: &str = "Discover and save your favorite plants";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Favorites,
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    Search(search::Message),
    Favorites(favorites::Message),
}

/// The active view; switching tabs replaces it with a fresh one
#[derive(Debug)]
enum Screen {
    Search(SearchView),
    Favorites(FavoritesView),
}

#[derive(Debug)]
pub struct App {
    client: CatalogClient,
    store: FavoritesStore,
    screen: Screen,
}

impl App {
    pub fn new(client: CatalogClient, store: FavoritesStore) -> (Self, Task<Message>) {
        let app = Self {
            client,
            store,
            screen: Screen::Search(SearchView::new()),
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        TITLE.to_string()
    }

    pub fn active_tab(&self) -> Tab {
        match self.screen {
            Screen::Search(_) => Tab::Search,
            Screen::Favorites(_) => Tab::Favorites,
        }
    }

    pub fn store(&self) -> &FavoritesStore {
        &self.store
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::TabSelected(tab) = message {
            return self.select(tab);
        }

        match (message, &mut self.screen) {
            (Message::Search(message), Screen::Search(view)) => view
                .update(message, &self.client, &mut self.store)
                .map(Message::Search),
            (Message::Favorites(message), Screen::Favorites(view)) => view
                .update(message, &self.client, &mut self.store)
                .map(Message::Favorites),
            (message, _) => {
                debug!(?message, "dropping message for a closed view");
                Task::none()
            }
        }
    }

    fn select(&mut self, tab: Tab) -> Task<Message> {
        if tab == self.active_tab() {
            return Task::none();
        }
        debug!(?tab, "switching tab");

        match tab {
            Tab::Search => {
                self.screen = Screen::Search(SearchView::new());
                Task::none()
            }
            Tab::Favorites => {
                let (view, task) = FavoritesView::new(&self.store, &self.client);
                self.screen = Screen::Favorites(view);
                task.map(Message::Favorites)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = container(
            column![text(TITLE).size(32), text(TAGLINE).size(16)]
                .spacing(4)
                .align_x(Alignment::Center),
        )
        .center_x(Length::Fill)
        .padding(20);

        let tabs = container(
            row![
                self.tab_button("Search", Tab::Search),
                self.tab_button("Favorites", Tab::Favorites),
            ]
            .spacing(8),
        )
        .center_x(Length::Fill);

        let content = match &self.screen {
            Screen::Search(view) => view.view().map(Message::Search),
            Screen::Favorites(view) => view.view().map(Message::Favorites),
        };

        column![
            header,
            tabs,
            scrollable(container(content).padding(20).width(Length::Fill)).height(Length::Fill),
        ]
        .spacing(12)
        .into()
    }

    fn tab_button<'a>(&self, label: &'a str, tab: Tab) -> Element<'a, Message> {
        let style: fn(&Theme, button::Status) -> button::Style = if self.active_tab() == tab {
            button::primary
        } else {
            button::text
        };

        button(text(label).size(16))
            .padding([8, 20])
            .style(style)
            .on_press(Message::TabSelected(tab))
            .into()
    }
}
