//! Shopper flow over a fixture catalog: search, pick variants, fill the cart and
//! check out with one order per store.

use jiff::civil::time;
use rust_decimal::Decimal;
use testresult::TestResult;

use achei::prelude::*;

const CATALOG: &str = include_str!("fixtures/catalog.json");

const SAO_PAULO: Coordinates = Coordinates::new(-23.5505, -46.6333);

fn catalog() -> TestResult<Catalog> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(CATALOG)?;

    Ok(Catalog::from_entries(entries))
}

fn named<'a>(catalog: &'a Catalog, name: &str) -> TestResult<&'a CatalogEntry> {
    Ok(catalog
        .entries()
        .iter()
        .find(|entry| entry.product.name == name)
        .ok_or(format!("no product named {name}"))?)
}

fn variant(entry: &CatalogEntry, color: &str, size: &str, stock: u32) -> ProductVariant {
    ProductVariant {
        id: VariantUuid::new(),
        product_id: entry.product.id,
        size: Some(size.to_string()),
        color: Some(color.to_string()),
        stock,
        sku: None,
    }
}

#[test]
fn catalog_is_listed_newest_first() -> TestResult {
    let catalog = catalog()?;

    let names: Vec<_> = catalog
        .entries()
        .iter()
        .map(|entry| entry.product.name.as_str())
        .collect();

    assert_eq!(
        names,
        [
            "Tênis Esportivo",
            "Perfume Importado",
            "Camiseta Básica",
            "Boné"
        ]
    );

    Ok(())
}

#[test]
fn loose_columns_are_normalised() -> TestResult {
    let catalog = catalog()?;
    let sneakers = named(&catalog, "Tênis Esportivo")?;
    let perfume = named(&catalog, "Perfume Importado")?;

    assert!(sneakers.product.sizes.is_empty());
    assert!(sneakers.product.colors.is_empty());
    assert!(sneakers.store.operating_days.is_empty());
    assert_eq!(perfume.product.description, None);
    assert_eq!(perfume.product.stock, None);

    Ok(())
}

#[test]
fn search_combines_text_city_and_distance() -> TestResult {
    let catalog = catalog()?;

    let nearby = catalog.search(&ProductFilter::new().near(SAO_PAULO, SearchRadius::new(100)));
    let nearby: Vec<_> = nearby.iter().map(|e| e.product.name.as_str()).collect();

    assert_eq!(nearby, ["Tênis Esportivo", "Camiseta Básica", "Boné"]);

    let in_campinas = catalog.search(&ProductFilter::new().with_city("CAMPINAS"));

    assert_eq!(in_campinas.len(), 1);

    let by_store = catalog.search(&ProductFilter::new().with_query("moda centro"));

    assert_eq!(by_store.len(), 2);

    let nothing = catalog.search(
        &ProductFilter::new()
            .with_query("perfume")
            .near(SAO_PAULO, SearchRadius::new(50)),
    );

    assert!(nothing.is_empty());

    Ok(())
}

#[test]
fn categories_follow_catalog_order() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(
        catalog.categories(),
        ["Calçados", "Cosméticos", "Roupas Masculinas", "Acessórios"]
    );

    Ok(())
}

#[test]
fn store_hours_and_labels_come_from_the_profile() -> TestResult {
    let catalog = catalog()?;
    let shirt = named(&catalog, "Camiseta Básica")?;
    let sneakers = named(&catalog, "Tênis Esportivo")?;
    let perfume = named(&catalog, "Perfume Importado")?;

    let hours = shirt.store.hours();

    assert_eq!(hours.days_label().as_deref(), Some("Seg a Sex"));
    assert_eq!(hours.hours_label().as_deref(), Some("09:00 - 18:00"));
    assert_eq!(hours.status_at(time(8, 59, 0, 0)), OpenStatus::Closed);
    assert_eq!(hours.status_at(time(18, 0, 0, 0)), OpenStatus::Open);

    assert!(sneakers.store.hours().is_open_at(time(3, 0, 0, 0)));
    assert_eq!(sneakers.store.hours().days_label(), None);

    assert_eq!(perfume.store.hours().days_label().as_deref(), Some("Sáb, Dom"));

    Ok(())
}

#[test]
fn checkout_builds_one_order_per_store() -> TestResult {
    let catalog = catalog()?;
    let shirt = named(&catalog, "Camiseta Básica")?;
    let cap = named(&catalog, "Boné")?;
    let perfume = named(&catalog, "Perfume Importado")?;

    let variants = [
        variant(shirt, "Branco", "P", 0),
        variant(shirt, "Branco", "M", 4),
        variant(shirt, "Preto", "M", 2),
    ];
    let resolver = VariantResolver::new(&variants);
    let selection = VariantSelection::default().with_color("Branco");

    assert_eq!(resolver.available_sizes(&selection), ["M"]);

    let selection = selection.with_size("M");
    let chosen = resolver.selected_variant(&selection).ok_or("no variant")?;

    assert_eq!(resolver.stock_for(&selection), Some(4));

    let mut cart = Cart::new();

    cart.add_item(shirt, Some(chosen), 1)?;
    cart.add_item(perfume, None, 1)?;
    cart.add_item(cap, None, 2)?;
    cart.add_item(shirt, Some(chosen), 1)?;

    assert_eq!(cart.len(), 3);
    assert_eq!(format_money(&cart.total()?), "R$ 279.80");

    let orders = compose_orders(&cart)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let stores: Vec<_> = orders.iter().map(|order| order.store_name.as_str()).collect();

    assert_eq!(stores, ["Moda Centro", "Aroma Rio"]);

    let first = orders.first().ok_or("missing order")?;

    assert!(first.link.starts_with("https://wa.me/5511987654321?text="));
    assert!(first.message.contains("📦 Camiseta Básica (Branco / M)\n   Quantidade: 2\n"));
    assert!(first.message.ends_with("💰 Total: R$ 129.80"));

    Ok(())
}

#[test]
fn cart_survives_a_round_trip_through_storage() -> TestResult {
    let catalog = catalog()?;
    let storage = MemoryCartStorage::new();
    let mut cart = storage.load()?;

    cart.add_item(named(&catalog, "Boné")?, None, 3)?;
    storage.save(&cart)?;

    let mut reloaded = storage.load()?;
    let key = reloaded.items().first().map(|item| item.id.clone()).ok_or("empty cart")?;

    reloaded.update_quantity(&key, -10)?;

    assert_eq!(reloaded.get(&key).map(|item| item.quantity), Some(1));
    assert_eq!(
        reloaded.get(&key).map(|item| item.subtotal()),
        Some(Decimal::from(25))
    );

    Ok(())
}
