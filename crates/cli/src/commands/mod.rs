//! Commands

use std::io::{self, Write};

use clap::Subcommand;

use achei::catalog::Catalog;
use achei_app::{context::AppContext, domain::catalog::refresh_catalog};

use crate::{
    config::{CliConfig, backend::BackendArgs},
    errors::CliError,
};

mod ads;
mod cart;
mod notifications;
mod products;
mod shop;
mod store;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search products across every store
    Search(shop::SearchArgs),

    /// Show one product with its store and variants
    Product(shop::ProductArgs),

    /// Manage the shopping cart
    Cart(cart::CartCommand),

    /// Manage a store profile
    Store(store::StoreCommand),

    /// Manage a store's products
    Products(products::ProductsCommand),

    /// Read a store's notifications
    Notifications(notifications::NotificationsCommand),

    /// Manage the storefront carousel
    Ads(ads::AdsCommand),
}

pub(crate) async fn run(config: CliConfig) -> Result<(), CliError> {
    let mut out = io::stdout().lock();

    match &config.command {
        Command::Search(args) => shop::search(&config, args, &mut out).await,
        Command::Product(args) => shop::product(&config, args, &mut out).await,
        Command::Cart(command) => cart::run(&config, command, &mut out).await,
        Command::Store(command) => store::run(&config, command, &mut out).await,
        Command::Products(command) => products::run(&config, command, &mut out).await,
        Command::Notifications(command) => notifications::run(&config, command, &mut out).await,
        Command::Ads(command) => ads::run(&config, command, &mut out).await,
    }?;

    out.flush()?;

    Ok(())
}

fn app_context(backend: &BackendArgs) -> Result<AppContext, CliError> {
    let config = backend
        .backend_config()
        .ok_or(CliError::BackendNotConfigured)?;

    Ok(AppContext::from_backend(config, &backend.image_bucket))
}

async fn load_catalog(context: &AppContext) -> Result<Catalog, CliError> {
    let mut catalog = Catalog::new();

    refresh_catalog(context.catalog.as_ref(), &mut catalog).await?;

    Ok(catalog)
}
