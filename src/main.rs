use dotenv::dotenv;
use milo_chat::{
    api::HttpBackend,
    config::{get_config, initialize_config},
    logging::init_logging,
    ui::run_ui,
    App,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    initialize_config()?;
    let config = get_config();
    let _logger = init_logging(&config)?;

    let backend = Arc::new(HttpBackend::new(config.base_url.clone()));
    let app = App::new(&config, backend);

    run_ui(app).await?;
    log::info!("bye");
    Ok(())
}
