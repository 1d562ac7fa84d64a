use anyhow::{Context, anyhow};
use plant_catalog::CatalogClient;
use plant_favorites::{App, AppConfig, config, logging};
use plant_store::{FavoritesStore, FileStorage};
use tracing::{error, info};

const WINDOW_SIZE: (f32, f32) = (1100.0, 800.0);

fn main() -> anyhow::Result<()> {
    logging::init();

    let settings = AppConfig::load().inspect_err(|err| error!(%err, "cannot start"))?;
    let client = CatalogClient::new(settings.catalog()).context("failed to create catalog client")?;
    let app_name = config::app_name();
    info!(base_url = client.base_url(), "starting");

    iced::application(
        move || {
            let storage = FileStorage::open(&app_name, config::STORE_GROUP);
            info!(path = %storage.path().display(), "using favorites file");
            App::new(client.clone(), FavoritesStore::new(storage))
        },
        App::update,
        App::view,
    )
    .title(App::title)
    .window_size(WINDOW_SIZE)
    .run()
    .map_err(|err| anyhow!("application failed: {err}"))
}
