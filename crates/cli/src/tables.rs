//! Terminal tables.

use jiff::Timestamp;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use achei::{
    advertisements::Advertisement,
    cart::Cart,
    geo::Coordinates,
    notifications::{StoreNotification, format_relative},
    pricing::format_price,
    products::{CatalogEntry, Product, ProductVariant},
};

const EMPTY: &str = "-";

fn styled(builder: Builder) -> Table {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);

    table
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_else(|| EMPTY.to_string())
}

/// Search results, with the distance column when a location is known.
pub(crate) fn catalog(entries: &[&CatalogEntry], location: Option<Coordinates>) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Id", "Produto", "Categoria", "Preço", "Loja", "Cidade", "Horário", "Status"];

    if location.is_some() {
        header.push("Distância");
    }

    builder.push_record(header);

    for entry in entries {
        let store = &entry.store;
        let hours = store.hours();

        let mut row = vec![
            entry.product.id.to_string(),
            entry.product.name.clone(),
            entry.product.category.clone(),
            format_price(entry.product.price),
            store.name.clone(),
            or_empty(store.city.clone()),
            or_empty(hours.hours_label()),
            hours.status_now().to_string(),
        ];

        if let Some(location) = location {
            row.push(or_empty(
                store
                    .coordinates()
                    .map(|coordinates| format!("{:.1} km", location.distance_km(&coordinates))),
            ));
        }

        builder.push_record(row);
    }

    let mut table = styled(builder);
    table.modify(Columns::new(3..4), Alignment::right());

    table.to_string()
}

/// A product's variants with their stock.
pub(crate) fn variants(variants: &[ProductVariant]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Cor", "Tamanho", "Estoque", "SKU"]);

    for variant in variants {
        builder.push_record([
            or_empty(variant.color.clone()),
            or_empty(variant.size.clone()),
            variant.stock.to_string(),
            or_empty(variant.sku.clone()),
        ]);
    }

    styled(builder).to_string()
}

/// A store's own products.
pub(crate) fn products(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Produto", "Categoria", "Preço", "Estoque"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            format_price(product.price),
            or_empty(product.stock.map(|stock| stock.to_string())),
        ]);
    }

    styled(builder).to_string()
}

/// Cart lines in cart order.
pub(crate) fn cart(cart: &Cart) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Chave", "Produto", "Qtd", "Preço", "Subtotal", "Loja"]);

    for item in cart.items() {
        builder.push_record([
            item.id.to_string(),
            item.display_name(),
            item.quantity.to_string(),
            format_price(item.price),
            format_price(item.subtotal()),
            item.store.name.clone(),
        ]);
    }

    styled(builder).to_string()
}

/// Notifications, newest first, with unread ones marked.
pub(crate) fn notifications(notifications: &[StoreNotification], now: Timestamp) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "Id", "Mensagem", "Quando"]);

    for notification in notifications {
        builder.push_record([
            if notification.is_read { "" } else { "•" }.to_string(),
            notification.id.to_string(),
            notification.message.clone(),
            format_relative(notification.created_at, now),
        ]);
    }

    styled(builder).to_string()
}

/// Carousel banners in the order given.
pub(crate) fn advertisements(advertisements: &[&Advertisement]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Ordem", "Título", "Subtítulo", "Botão", "Ativa"]);

    for ad in advertisements {
        builder.push_record([
            ad.id.to_string(),
            ad.display_order.to_string(),
            ad.title.clone(),
            ad.subtitle.clone(),
            ad.cta_text.clone(),
            if ad.is_active { "Sim" } else { "Não" }.to_string(),
        ]);
    }

    styled(builder).to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use achei::{
        advertisements::AdvertisementUuid,
        products::{ProductUuid, SizeKind, VariantUuid},
        stores::{StoreProfile, StoreUuid},
    };

    use super::*;

    fn entry() -> TestResult<CatalogEntry> {
        Ok(CatalogEntry {
            product: Product {
                id: ProductUuid::new(),
                store_id: StoreUuid::new(),
                name: "Caneca".to_string(),
                price: Decimal::new(2550, 2),
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
                name: "Casa Bela".to_string(),
                city: Some("Campinas".to_string()),
                latitude: Some(-22.9056),
                longitude: Some(-47.0608),
                ..StoreProfile::default()
            },
        })
    }

    #[test]
    fn catalog_rows_show_price_and_store() -> TestResult {
        let entry = entry()?;
        let table = catalog(&[&entry], None);

        assert!(table.contains("Caneca"));
        assert!(table.contains("R$ 25.50"));
        assert!(table.contains("Casa Bela"));
        assert!(table.contains("Aberta"));
        assert!(!table.contains("Distância"));

        Ok(())
    }

    #[test]
    fn catalog_shows_distance_near_a_location() -> TestResult {
        let entry = entry()?;
        let table = catalog(&[&entry], Some(Coordinates::new(-22.9056, -47.0608)));

        assert!(table.contains("Distância"));
        assert!(table.contains("0.0 km"));

        Ok(())
    }

    #[test]
    fn variants_show_blank_axes_as_dashes() {
        let variant = ProductVariant {
            id: VariantUuid::new(),
            product_id: ProductUuid::new(),
            size: Some("M".to_string()),
            color: None,
            stock: 7,
            sku: None,
        };

        let table = variants(&[variant]);

        assert!(table.contains(" M "));
        assert!(table.contains(" 7 "));
        assert!(table.contains(" - "));
    }

    #[test]
    fn advertisements_mark_hidden_banners() {
        let ad = Advertisement {
            id: AdvertisementUuid::new(),
            title: "Parcele em até 12x".to_string(),
            subtitle: "Sem juros no cartão".to_string(),
            cta_text: "Ver Ofertas".to_string(),
            gradient: String::new(),
            image_url: None,
            is_active: false,
            display_order: 3,
            store_id: None,
            created_at: None,
        };

        let table = advertisements(&[&ad]);

        assert!(table.contains("Parcele em até 12x"));
        assert!(table.contains("Ver Ofertas"));
        assert!(table.contains(" Não "));
        assert!(table.contains(" 3 "));
    }
}
