use anyhow::Context;
use stockroom_app::{AppConfig, Dashboard, OutputFormat, render_json, render_text};
use stockroom_inventory::InventoryStore;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    stockroom_observability::init_with(
        config.as_ref().map(|c| c.log_format).unwrap_or_default(),
    );
    let config = config.context("failed to read configuration")?;

    let store = if config.seed_demo {
        InventoryStore::with_demo_data()
    } else {
        tracing::warn!("STOCKROOM_SEED_DEMO disabled; starting with an empty inventory");
        InventoryStore::new()
    };

    let dashboard = Dashboard::build(&store, config.top_products);
    tracing::info!(
        total_products = dashboard.summary.total_products(),
        low_stock_items = dashboard.summary.low_stock_items(),
        "inventory loaded"
    );

    let report = match config.output {
        OutputFormat::Text => render_text(&dashboard),
        OutputFormat::Json => render_json(&dashboard).context("failed to render dashboard")?,
    };
    println!("{report}");

    Ok(())
}
