//! Catalog browsing.

use std::io::Write;

use clap::Args;

use achei::{
    geo::{Coordinates, SearchRadius},
    pricing::format_price,
    products::ProductUuid,
    search::ProductFilter,
    variants::{VariantResolver, VariantSelection},
};

use crate::{
    commands::{app_context, load_catalog},
    config::CliConfig,
    errors::CliError,
    tables,
};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Text matched against product, category, store and description
    query: Option<String>,

    /// City matched against the store's address or city
    #[arg(long)]
    city: Option<String>,

    /// Part of the product category
    #[arg(long)]
    category: Option<String>,

    /// Your latitude
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Search radius in kilometres (1 to 100)
    #[arg(long, default_value_t = SearchRadius::DEFAULT_KM)]
    radius: u32,
}

impl SearchArgs {
    fn location(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    fn filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::new();

        if let Some(query) = &self.query {
            filter = filter.with_query(query);
        }

        if let Some(city) = &self.city {
            filter = filter.with_city(city);
        }

        if let Some(category) = &self.category {
            filter = filter.with_category(category);
        }

        if let Some(location) = self.location() {
            filter = filter.near(location, SearchRadius::new(self.radius));
        }

        filter
    }
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    product: ProductUuid,
}

pub(crate) async fn search(
    config: &CliConfig,
    args: &SearchArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;
    let catalog = load_catalog(&context).await?;

    let results = catalog.search(&args.filter());

    if results.is_empty() {
        writeln!(out, "Nenhum produto encontrado")?;

        return Ok(());
    }

    writeln!(out, "{}", tables::catalog(&results, args.location()))?;
    writeln!(out, "{} produto(s)", results.len())?;

    Ok(())
}

pub(crate) async fn product(
    config: &CliConfig,
    args: &ProductArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;
    let catalog = load_catalog(&context).await?;

    let entry = catalog
        .find(args.product)
        .ok_or(CliError::UnknownProduct(args.product))?;

    let product = &entry.product;
    let store = &entry.store;
    let hours = store.hours();

    writeln!(out, "{} ({})", product.name, product.category)?;
    writeln!(out, "{}", format_price(product.price))?;

    if let Some(description) = &product.description {
        writeln!(out, "{description}")?;
    }

    writeln!(out)?;
    writeln!(out, "Loja: {} - {}", store.name, hours.status_now())?;

    if !store.address.is_empty() {
        writeln!(out, "Endereço: {}", store.address)?;
    }

    if let Some(label) = hours.hours_label() {
        writeln!(out, "Horário: {label}")?;
    }

    if let Some(label) = hours.days_label() {
        writeln!(out, "Dias: {label}")?;
    }

    if !product.has_variant_axes() {
        return Ok(());
    }

    let variants = context.catalog.list_variants(product.id).await?;
    let resolver = VariantResolver::new(&variants);
    let selection = VariantSelection::default();

    writeln!(out)?;
    writeln!(
        out,
        "Cores disponíveis: {}",
        resolver.available_colors(&selection).join(", ")
    )?;
    writeln!(
        out,
        "Tamanhos disponíveis: {}",
        resolver.available_sizes(&selection).join(", ")
    )?;
    writeln!(out, "{}", tables::variants(&variants))?;

    Ok(())
}
