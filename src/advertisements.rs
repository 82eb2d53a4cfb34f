//! Advertisements
//!
//! Banners shown in the storefront carousel. Only accounts holding the admin
//! role manage them; everyone sees the active ones in display order.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{normalize::non_empty, stores::StoreUuid, uuids::TypedUuid};

/// Advertisement UUID
pub type AdvertisementUuid = TypedUuid<Advertisement>;

/// Button text used when none is given.
pub const DEFAULT_CTA: &str = "Explorar";

/// Banner style used when none is given.
pub const DEFAULT_GRADIENT: &str = "from-primary via-primary/90 to-primary/80";

/// A carousel banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Advertisement identifier
    pub id: AdvertisementUuid,

    /// Headline
    pub title: String,

    /// Line under the headline
    pub subtitle: String,

    /// Button text
    pub cta_text: String,

    /// Banner style classes
    pub gradient: String,

    /// Background image
    #[serde(default, deserialize_with = "non_empty")]
    pub image_url: Option<String>,

    /// Whether the banner is shown; unset means shown
    #[serde(default = "shown", deserialize_with = "active_flag")]
    pub is_active: bool,

    /// Position in the carousel, lowest first; unset means 0
    #[serde(default, deserialize_with = "display_order")]
    pub display_order: i32,

    /// Store being promoted, if any
    #[serde(default)]
    pub store_id: Option<StoreUuid>,

    /// When the banner was created
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A validated banner ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAdvertisement {
    /// Headline
    pub title: String,

    /// Line under the headline
    pub subtitle: String,

    /// Button text
    pub cta_text: String,

    /// Banner style classes
    pub gradient: String,

    /// Background image
    pub image_url: Option<String>,

    /// Whether the banner starts out shown
    pub is_active: bool,

    /// Position in the carousel
    pub display_order: i32,

    /// Store being promoted
    pub store_id: Option<StoreUuid>,
}

/// Active banners in carousel order.
///
/// Ties on `display_order` keep their input order.
pub fn carousel(advertisements: &[Advertisement]) -> Vec<&Advertisement> {
    let mut shown: Vec<&Advertisement> = advertisements.iter().filter(|ad| ad.is_active).collect();

    shown.sort_by_key(|ad| ad.display_order);

    shown
}

fn shown() -> bool {
    true
}

fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn display_order<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn banner(title: &str, is_active: bool, display_order: i32) -> Advertisement {
        Advertisement {
            id: AdvertisementUuid::new(),
            title: title.to_string(),
            subtitle: "Compre de lojas próximas a você".to_string(),
            cta_text: DEFAULT_CTA.to_string(),
            gradient: DEFAULT_GRADIENT.to_string(),
            image_url: None,
            is_active,
            display_order,
            store_id: None,
            created_at: None,
        }
    }

    #[test]
    fn carousel_shows_active_banners_in_order() {
        let ads = vec![
            banner("Parcele em até 12x", true, 2),
            banner("Fora do ar", false, 0),
            banner("Encontre produtos locais", true, 1),
            banner("Pagamento seguro", true, 2),
        ];

        let titles: Vec<&str> = carousel(&ads).iter().map(|ad| ad.title.as_str()).collect();

        assert_eq!(
            titles,
            ["Encontre produtos locais", "Parcele em até 12x", "Pagamento seguro"]
        );
    }

    #[test]
    fn null_columns_take_defaults() -> TestResult {
        let ad: Advertisement = serde_json::from_value(json!({
            "id": "0190a6f4-5b1e-7c3a-9d2e-3f4a5b6c7d8e",
            "title": "Encontre produtos locais",
            "subtitle": "Compre de lojas próximas a você",
            "cta_text": "Explorar Agora",
            "gradient": DEFAULT_GRADIENT,
            "image_url": "",
            "is_active": null,
            "display_order": null,
            "store_id": null,
            "created_at": null,
            "updated_at": null
        }))?;

        assert!(ad.is_active);
        assert_eq!(ad.display_order, 0);
        assert_eq!(ad.image_url, None);

        Ok(())
    }
}
