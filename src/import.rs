//! Bulk product import
//!
//! A header row followed by one product per line, with the columns
//! `name,price,description,category,stock,size_type,sizes,colors`. Fields are
//! read by position. Double-quoted fields may contain commas, and `""` inside
//! a quoted field is a literal quote.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    products::{NewProduct, SizeKind},
    stores::StoreUuid,
};

/// Example file offered to lojistas as a starting point.
pub const BULK_IMPORT_TEMPLATE: &str = "\
name,price,description,category,stock,size_type,sizes,colors
Camiseta Básica,39.90,Camiseta 100% algodão,Roupas Masculinas,50,letter,\"P,M,G,GG\",\"Branco,Preto,Azul\"
Vestido Floral,89.90,Vestido estampado,Roupas Femininas,30,letter,\"P,M,G\",Rosa
Tênis Esportivo,199.90,Tênis para corrida,Calçados,20,number,\"38,39,40,41,42\",\"Preto,Branco\"
Perfume Importado,150.00,Fragrância suave,Cosméticos,100,none,,
";

/// Suggested file name for [`BULK_IMPORT_TEMPLATE`].
pub const TEMPLATE_FILE_NAME: &str = "template_produtos.csv";

/// Category given to rows that leave it blank.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Errors that abort an import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than a header and one data row.
    #[error("the file must contain a header and at least one product row")]
    Empty,

    /// A row has a negative price (1-based line number, counting non-blank lines).
    #[error("line {line}: price must not be negative")]
    NegativePrice {
        /// Offending line
        line: usize,
    },
}

type Fields = SmallVec<[String; 8]>;

/// Parse an import file into products for `store`.
///
/// Blank lines are ignored. Rows with fewer fields than the header are skipped.
/// Unparseable prices and stock counts become zero, a blank category becomes
/// [`DEFAULT_CATEGORY`], and a blank or unknown size type becomes
/// [`SizeKind::None`].
///
/// # Errors
///
/// - [`ImportError::Empty`]: no header or no data rows.
/// - [`ImportError::NegativePrice`]: a row has a negative price.
pub fn parse_bulk_import(text: &str, store: StoreUuid) -> Result<Vec<NewProduct>, ImportError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(ImportError::Empty)?;
    let columns = split_fields(header).len();

    let mut products = Vec::new();
    let mut rows = 0_usize;

    for (offset, line) in lines.enumerate() {
        rows += 1;

        let fields = split_fields(line);

        if fields.len() < columns {
            continue;
        }

        products.push(product_from_fields(&fields, store, offset + 2)?);
    }

    if rows == 0 {
        return Err(ImportError::Empty);
    }

    Ok(products)
}

fn product_from_fields(
    fields: &Fields,
    store: StoreUuid,
    line: usize,
) -> Result<NewProduct, ImportError> {
    let field = |index: usize| fields.get(index).map_or("", String::as_str);

    let price = field(1).parse::<Decimal>().unwrap_or(Decimal::ZERO);

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ImportError::NegativePrice { line });
    }

    let category = match field(3) {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    };

    Ok(NewProduct {
        store_id: store,
        name: field(0).to_string(),
        price,
        description: Some(field(2).to_string()).filter(|text| !text.is_empty()),
        category,
        stock: parse_stock(field(4)),
        image_url: None,
        colors: split_list(field(7)),
        sizes: split_list(field(6)),
        size_type: SizeKind::from_token(field(5)),
    })
}

/// Leading integer of `text`, so `12.5` and `12 un` both count as 12.
fn parse_stock(text: &str) -> u32 {
    let text = text.trim_start();
    let digits = text.strip_prefix('+').unwrap_or(text);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits
        .get(..end)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0)
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Split one line into trimmed fields, honouring double quotes.
fn split_fields(line: &str) -> Fields {
    let mut fields = Fields::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());

    fields
}
