//! Store product commands.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use achei::{
    import::{BULK_IMPORT_TEMPLATE, TEMPLATE_FILE_NAME},
    pricing::format_price,
    products::{Product, ProductUuid, SizeKind},
    stores::StoreUuid,
};
use achei_app::admin::{AdminConsole, ProductDraft, VariantDraft};

use crate::{
    commands::app_context,
    config::CliConfig,
    errors::CliError,
    tables,
};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List a store's products
    List {
        /// Store id
        store: StoreUuid,
    },

    /// Add a product to a store
    Create {
        /// Store id
        store: StoreUuid,

        #[command(flatten)]
        form: ProductForm,
    },

    /// Replace a product's details
    Update {
        /// Product id
        product: ProductUuid,

        #[command(flatten)]
        form: ProductForm,
    },

    /// Delete a product
    Delete {
        /// Product id
        product: ProductUuid,
    },

    /// Replace a product's variant grid
    Variants(VariantsArgs),

    /// Import products from a bulk file
    Import {
        /// Store id
        store: StoreUuid,

        /// File in the bulk import layout
        file: PathBuf,
    },

    /// Write the bulk import template
    Template {
        /// Destination file
        #[arg(default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,
    },

    /// Upload a product image and print its URL
    Image {
        /// Store id
        store: StoreUuid,

        /// Image file
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ProductForm {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in reais
    #[arg(long)]
    price: Decimal,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Category
    #[arg(long)]
    category: String,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Colors, comma separated
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<String>,

    /// Size labelling (none, letter, number)
    #[arg(long, default_value = "none", value_parser = parse_size_kind)]
    size_type: SizeKind,
}

impl From<&ProductForm> for ProductDraft {
    fn from(form: &ProductForm) -> Self {
        Self {
            name: form.name.clone(),
            price: form.price,
            description: form.description.clone(),
            category: form.category.clone(),
            stock: form.stock,
            image_url: form.image_url.clone(),
            colors: form.colors.clone(),
            sizes: form.sizes.clone(),
            size_type: form.size_type,
        }
    }
}

#[derive(Debug, Args)]
struct VariantsArgs {
    /// Product id
    product: ProductUuid,

    /// Colors, comma separated
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<String>,

    /// Stock per SKU, e.g. PRETO-M=4 (repeatable)
    #[arg(long = "stock", value_parser = parse_sku_stock)]
    stock: Vec<(String, u32)>,
}

impl From<&VariantsArgs> for VariantDraft {
    fn from(args: &VariantsArgs) -> Self {
        Self {
            colors: args.colors.clone(),
            sizes: args.sizes.clone(),
            stock: args.stock.iter().cloned().collect(),
        }
    }
}

fn parse_size_kind(text: &str) -> Result<SizeKind, String> {
    let kind = SizeKind::from_token(text);

    if kind.token() == text.trim().to_ascii_lowercase() {
        Ok(kind)
    } else {
        Err(format!("expected none, letter or number, got {text:?}"))
    }
}

fn parse_sku_stock(text: &str) -> Result<(String, u32), String> {
    let (sku, stock) = text
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SKU=STOCK, got {text:?}"))?;

    let stock = stock
        .trim()
        .parse()
        .map_err(|error| format!("invalid stock in {text:?}: {error}"))?;

    Ok((sku.trim().to_string(), stock))
}

fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) async fn run(
    config: &CliConfig,
    command: &ProductsCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let ProductsSubcommand::Template { output } = &command.command {
        fs::write(output, BULK_IMPORT_TEMPLATE)?;
        writeln!(out, "Modelo salvo em {}", output.display())?;

        return Ok(());
    }

    let context = app_context(&config.backend)?;
    let admin = AdminConsole::from_context(&context);

    match &command.command {
        ProductsSubcommand::List { store } => {
            let products = context.products.list_store_products(*store).await?;

            if products.is_empty() {
                writeln!(out, "Nenhum produto cadastrado")?;
            } else {
                writeln!(out, "{}", tables::products(&products))?;
            }
        }
        ProductsSubcommand::Create { store, form } => {
            let product = admin.create_product(*store, form.into()).await?;
            write_saved(&product, out)?;
        }
        ProductsSubcommand::Update { product, form } => {
            let product = admin.update_product(*product, form.into()).await?;
            write_saved(&product, out)?;
        }
        ProductsSubcommand::Delete { product } => {
            admin.delete_product(*product).await?;
            writeln!(out, "Produto {product} removido")?;
        }
        ProductsSubcommand::Variants(args) => {
            let variants = admin.save_variants(args.product, args.into()).await?;

            writeln!(out, "{} variante(s) salvas", variants.len())?;

            if !variants.is_empty() {
                writeln!(out, "{}", tables::variants(&variants))?;
            }
        }
        ProductsSubcommand::Import { store, file } => {
            let bytes = read(file)?;
            let text = String::from_utf8_lossy(&bytes);

            let count = admin.import_products(*store, &text).await?;

            writeln!(out, "{count} produto(s) importado(s)")?;
        }
        ProductsSubcommand::Image { store, file } => {
            let bytes = read(file)?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let url = admin
                .upload_product_image(*store, &file_name, bytes, content_type(file))
                .await?;

            writeln!(out, "{url}")?;
        }
        ProductsSubcommand::Template { .. } => {}
    }

    Ok(())
}

fn write_saved(product: &Product, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(
        out,
        "{} ({}) - {}",
        product.name,
        product.id,
        format_price(product.price)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_stock_pairs() {
        assert_eq!(parse_sku_stock("PRETO-M=4"), Ok(("PRETO-M".to_string(), 4)));
        assert!(parse_sku_stock("PRETO-M").is_err());
        assert!(parse_sku_stock("PRETO-M=-1").is_err());
    }

    #[test]
    fn size_kinds_must_be_known() {
        assert_eq!(parse_size_kind("Letter"), Ok(SizeKind::Letter));
        assert!(parse_size_kind("xl").is_err());
    }

    #[test]
    fn content_types_follow_the_extension() {
        assert_eq!(content_type(Path::new("a/foto.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("foto.png")), "image/png");
        assert_eq!(content_type(Path::new("foto")), "application/octet-stream");
    }
}
