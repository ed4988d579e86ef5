mod actor_framework;
mod app_system;
mod catalog;
mod clients;
mod config;
mod cost;
mod domain;
mod import;
mod seed;
mod session;

mod dish_actor;
mod product_actor;
mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, AppError, MarketplaceSystem};
use crate::catalog::{CatalogQuery, SortBy};
use crate::config::Config;
use crate::domain::{Cart, Role};
use crate::session::FileSessionStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::load()?;
    info!(seed = config.seed, session = %config.session_path.display(), "Starting restaurant marketplace");

    let system = MarketplaceSystem::new(&config);

    seed::populate(&system, config.seed, config.sample_products)
        .instrument(tracing::info_span!("seeding"))
        .await?;

    if let Some(path) = &config.import_file {
        let span = tracing::info_span!("import", file = %path.display());
        async {
            let Some(supplier) = system.user_client.first_with_role(Role::Supplier).await? else {
                warn!("No supplier account to attribute the import to, skipping");
                return Ok::<_, AppError>(());
            };
            let batch = import::load_file(path, &supplier)?;
            let outcome = import::import_products(&system.product_client, batch).await;
            for rejected in &outcome.rejected {
                warn!(line = rejected.line, reason = %rejected.reason, "Row skipped");
            }
            Ok(())
        }
        .instrument(span)
        .await?;
    }

    // The cost report belongs to a restaurant, so a supplier session is swapped out.
    let store = FileSessionStore::new(config.session_path.clone());
    let user = match session::restore(&system.user_client, &store).await? {
        Some(user) if user.role == Role::Restaurant => user,
        _ => session::login_as(&system.user_client, &store, Role::Restaurant).await?,
    };
    info!(user_id = %user.id, business = %user.business_name, "Active session");

    let span = tracing::info_span!("catalog_browse");
    let products = async {
        let products = system.product_client.list_products().await?;
        let query = CatalogQuery {
            in_stock_only: true,
            sort: SortBy::UnitPrice,
            ..Default::default()
        };
        let found = catalog::search(&products, &query);
        info!(
            products = products.len(),
            in_stock = found.len(),
            categories = ?catalog::categories(&products),
            "Catalog loaded"
        );
        Ok::<_, AppError>(products)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("cart");
    async {
        let mut cart = Cart::new();
        let query = CatalogQuery { in_stock_only: true, ..Default::default() };
        for product in catalog::search(&products, &query).into_iter().take(3) {
            cart.add(product, 2)?;
        }
        for (supplier, total) in cart.totals_by_supplier() {
            info!(supplier = %supplier, total, "Cart supplier total");
        }
        info!(items = cart.item_count(), subtotal = cart.subtotal(), "Cart ready");
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("cost_report", user_id = %user.id);
    async {
        let report = system.analysis_client.report_for(user.id.clone()).await?;
        for result in report.with_alternatives() {
            if let Some(alternative) = &result.alternative {
                info!(
                    ingredient = %result.ingredient.display_name,
                    product = %alternative.product.name,
                    supplier = %alternative.product.supplier_name,
                    savings_pct = result.savings_percentage,
                    monthly = result.monthly_savings,
                    "Cheaper alternative"
                );
            }
        }
        info!(
            current_cost = report.total_current_cost,
            monthly_savings = report.total_monthly_savings,
            annual_savings = report.total_annual_savings,
            "Cost report"
        );
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
