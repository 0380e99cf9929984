//! Storefront demo
//!
//! Runs the intake form once against an in-memory store, shows the review
//! board for the resulting order, then serves the REST routes.
//!
//! ```bash
//! DASHBOARD_USER=ops DASHBOARD_PASSWORD=secret \
//!     cargo run --example storefront -- storefront.yaml
//! ```

use preorder::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("preorder=info,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StorefrontConfig::from_yaml_file(&path)?,
        None => StorefrontConfig::default_config(),
    }
    .with_env_overrides()?;

    let memory = InMemoryOrderStore::new();
    let store: Arc<dyn OrderStore> = Arc::new(memory.clone());

    // Intake form: fill, submit, observe the navigation signal
    let signals = SignalBus::default();
    let mut receiver = signals.subscribe();
    let form = IntakeForm::new(store.clone(), signals);
    form.open();
    form.set_name("Ada Lovelace");
    form.set_email("ada@example.com");
    form.set_phone("555-0100");
    form.set_address("12 Analytical Row");
    form.select_size(Size::M);
    form.set_quantity_input("2");

    let receipt = form.submit().await?;
    let envelope = receiver.recv().await?;
    println!("submitted {} -> {}", receipt.id, envelope.signal.name());

    // Review board: summary and a status transition
    let board = ReviewBoard::open(store).await;
    board.update_status(receipt.id, OrderStatus::Contacted).await?;
    let summary = board.summary();
    println!("orders on board: {}", summary.total());
    for (size, count) in summary.by_size() {
        println!("  {size}: {count}");
    }

    ServerBuilder::new()
        .with_store(memory)
        .with_config(&config)
        .serve(&config.server.bind)
        .await
}
