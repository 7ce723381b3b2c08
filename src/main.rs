use anyhow::Result;
use newsflow::api::NewsApi;
use newsflow::config::initialize_config;
use newsflow::logging::init_logging;
use newsflow::preferences::PreferenceStore;
use newsflow::ui::run_ui;
use newsflow::{feed_view, App};
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_config()?;
    init_logging()?;

    let api = NewsApi::from_config()?;
    let prefs = PreferenceStore::default_location()?;
    let app = Arc::new(Mutex::new(App::new(api, prefs)));

    tokio::spawn(feed_view::load_feed(app.clone()));
    run_ui(app).await?;
    Ok(())
}
