use std::sync::Arc;

use restaurant::{configuration::{Settings, StoreBackend}, startup::Application, store::{DocumentStore, MemoryStore, MongoStore}, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("Restaurant".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()?;

    let store: Arc<dyn DocumentStore> = match config.database.backend {
        StoreBackend::Mongo => {
            let store = MongoStore::connect(&config.database).await?;
            store.ensure_indexes().await?;
            Arc::new(store)
        },
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, nothing survives a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let application = Application::build(config, store)?;
    tracing::info!(host = %application.host, port = application.port, "Listening");
    application.run_until_stopped().await?;
    Ok(())
}
