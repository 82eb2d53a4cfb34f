//! Shopping cart commands.

use std::io::Write;

use clap::{Args, Subcommand};
use tracing::warn;

use achei::{
    cart::{
        Cart, CartKey,
        storage::{CartStorage, FileCartStorage},
    },
    order::compose_orders,
    pricing::format_money,
    products::ProductUuid,
    variants::{VariantResolver, VariantSelection},
};

use crate::{
    commands::{app_context, load_catalog},
    config::CliConfig,
    errors::CliError,
    tables,
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product to the cart
    Add(AddArgs),

    /// Show the cart
    List,

    /// Add one unit to a line
    Inc(LineArgs),

    /// Remove one unit from a line, keeping at least one
    Dec(LineArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Build one order message per store
    Checkout,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    product: ProductUuid,

    /// Variant color
    #[arg(long)]
    color: Option<String>,

    /// Variant size
    #[arg(long)]
    size: Option<String>,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Line key as shown by `cart list`
    key: String,
}

pub(crate) async fn run(
    config: &CliConfig,
    command: &CartCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let storage = FileCartStorage::new(&config.cart_file);
    let mut cart = storage.load()?;

    match &command.command {
        CartSubcommand::Add(args) => {
            add(config, &mut cart, args, out).await?;
            storage.save(&cart)?;
        }
        CartSubcommand::List => list(&cart, out)?,
        CartSubcommand::Inc(args) => {
            change(&mut cart, args, 1, out)?;
            storage.save(&cart)?;
        }
        CartSubcommand::Dec(args) => {
            change(&mut cart, args, -1, out)?;
            storage.save(&cart)?;
        }
        CartSubcommand::Remove(args) => {
            let removed = cart.remove_item(&CartKey::from(args.key.as_str()))?;
            storage.save(&cart)?;

            writeln!(out, "Removido: {}", removed.display_name())?;
        }
        CartSubcommand::Checkout => checkout(&cart, out)?,
    }

    Ok(())
}

async fn add(
    config: &CliConfig,
    cart: &mut Cart,
    args: &AddArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;
    let catalog = load_catalog(&context).await?;

    let entry = catalog
        .find(args.product)
        .ok_or(CliError::UnknownProduct(args.product))?;

    let variants = if entry.product.has_variant_axes() {
        context.catalog.list_variants(entry.product.id).await?
    } else {
        Vec::new()
    };

    let mut selection = VariantSelection::default();

    if let Some(color) = &args.color {
        selection = selection.with_color(color);
    }

    if let Some(size) = &args.size {
        selection = selection.with_size(size);
    }

    let variant = match (&args.color, &args.size) {
        (None, None) => None,
        _ => Some(
            VariantResolver::new(&variants)
                .selected_variant(&selection)
                .ok_or(CliError::UnknownVariant)?,
        ),
    };

    let item = cart.add_item(entry, variant, args.quantity)?;

    writeln!(
        out,
        "Adicionado: {} x{} ({})",
        item.display_name(),
        item.quantity,
        item.id
    )?;

    Ok(())
}

fn change(cart: &mut Cart, args: &LineArgs, delta: i64, out: &mut impl Write) -> Result<(), CliError> {
    let quantity = cart.update_quantity(&CartKey::from(args.key.as_str()), delta)?;

    writeln!(out, "Quantidade: {quantity}")?;

    Ok(())
}

fn list(cart: &Cart, out: &mut impl Write) -> Result<(), CliError> {
    if cart.is_empty() {
        writeln!(out, "Seu carrinho está vazio")?;

        return Ok(());
    }

    writeln!(out, "{}", tables::cart(cart))?;

    for group in cart.group_by_store() {
        writeln!(
            out,
            "{}: {}",
            group.store.name,
            group.total().map_or_else(|error| error.to_string(), |total| format_money(&total))
        )?;
    }

    Ok(())
}

fn checkout(cart: &Cart, out: &mut impl Write) -> Result<(), CliError> {
    if cart.is_empty() {
        writeln!(out, "Seu carrinho está vazio")?;

        return Ok(());
    }

    for (group, order) in cart.group_by_store().iter().zip(compose_orders(cart)) {
        match order {
            Ok(order) => {
                writeln!(out, "== {} ({})", order.store_name, format_money(&order.total))?;
                writeln!(out, "{}", order.message)?;
                writeln!(out, "{}", order.link)?;
            }
            Err(error) => {
                warn!(store = %group.store.name, %error, "order not composed");
                writeln!(out, "== {}: {error}", group.store.name)?;
            }
        }

        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use achei::{
        products::{CatalogEntry, Product, SizeKind},
        stores::{StoreProfile, StoreUuid},
    };

    use super::*;

    fn entry(store: &str, whatsapp: &str) -> TestResult<CatalogEntry> {
        Ok(CatalogEntry {
            product: Product {
                id: ProductUuid::new(),
                store_id: StoreUuid::new(),
                name: "Caneca".to_string(),
                price: Decimal::new(2000, 2),
                description: None,
                category: "Casa".to_string(),
                stock: None,
                image_url: None,
                colors: Vec::new(),
                sizes: Vec::new(),
                size_type: SizeKind::None,
                created_at: Timestamp::from_second(0)?,
            },
            store: StoreProfile {
                name: store.to_string(),
                whatsapp: whatsapp.to_string(),
                ..StoreProfile::default()
            },
        })
    }

    #[test]
    fn checkout_prints_a_link_per_store_and_reports_missing_contacts() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(&entry("Casa Bela", "(19) 99999-0000")?, None, 2)?;
        cart.add_item(&entry("Sem Contato", "")?, None, 1)?;

        let mut out = Vec::new();
        checkout(&cart, &mut out)?;
        let text = str::from_utf8(&out)?;

        assert!(text.contains("https://wa.me/5519999990000?text="));
        assert!(text.contains("== Sem Contato:"));

        Ok(())
    }

    #[test]
    fn empty_cart_lists_a_message() -> TestResult {
        let mut out = Vec::new();
        list(&Cart::new(), &mut out)?;

        assert_eq!(str::from_utf8(&out)?, "Seu carrinho está vazio\n");

        Ok(())
    }
}
