//! Rebate Command Line

use std::{io, process::ExitCode};

use jiff::Timestamp;
use tracing::{error, info};

use rebate::{
    config::Config, engine::PromotionEngine, fixtures::Catalog, observability::init_subscriber,
    report::write_report,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            // Help and version requests also arrive here
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    let catalog = match Catalog::load(&config.catalog.catalog) {
        Ok(catalog) => catalog,
        Err(error) => {
            error!(%error, path = %config.catalog.catalog.display(), "failed to load catalog");

            return ExitCode::FAILURE;
        }
    };

    let (mut products, repository) = catalog.into_parts();

    if let Some(id) = config.catalog.product.as_deref() {
        products.retain(|product| product.id.as_str() == id);

        if products.is_empty() {
            error!(product_id = id, "product not found in catalog");

            return ExitCode::FAILURE;
        }
    }

    let now = config.catalog.at.unwrap_or_else(Timestamp::now);

    info!(products = products.len(), %now, "evaluating promotions");

    let engine = PromotionEngine::new(repository);
    let results = engine.calculate_product_promotions_at(&products, now).await;

    if let Err(error) = write_report(io::stdout().lock(), &products, &results) {
        error!(%error, "failed to write report");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
