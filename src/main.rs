use catalog_client::{CatalogBackend, CatalogConfig, CatalogHttpClient};
use query_engine::profiles;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, when one is present.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,query_engine=debug"))
        .unwrap();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cfg = CatalogConfig::from_env();
    tracing::info!(base_api = %cfg.base_api, "starting demo session");

    let client = CatalogHttpClient::from_config(&cfg)?;
    let engine = profiles::search_screen(CatalogBackend::Http(client));
    let mut updates = engine.subscribe();

    let categories = engine.categories().await;
    tracing::info!(
        entries = categories.entries.len(),
        degraded = categories.degraded,
        "categories loaded"
    );

    // Initial unfiltered load, then a debounced text query over it.
    engine.load();
    engine.set_text("chocolate");

    for _ in 0..6 {
        if updates.changed().await.is_err() {
            break;
        }
        let snap = updates.borrow_and_update().clone();
        tracing::info!(
            items = snap.results.items.len(),
            page = snap.results.page,
            has_more = snap.results.has_more,
            loading = snap.loading,
            error = snap.error.as_ref().map(|e| e.message.as_str()),
            "state"
        );
        if !snap.loading && !snap.refreshing && snap.results.page > 0 && snap.results.has_more {
            engine.load_more();
        }
    }

    Ok(())
}
