//! Stores

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    geo::Coordinates,
    hours::{OperatingDays, StoreHours, TimeOfDay, lenient_time},
    normalize::non_empty,
    uuids::TypedUuid,
};

/// Store UUID
pub type StoreUuid = TypedUuid<Store>;

/// Account UUID of the owning lojista
pub type AccountUuid = TypedUuid<Account>;

/// Marker for account identifiers issued by the identity provider.
#[derive(Debug, Clone, Copy)]
pub struct Account;

/// A physical store as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Store identifier
    pub id: StoreUuid,

    /// Owning account
    pub user_id: AccountUuid,

    /// Display name
    pub name: String,

    /// Messaging contact handle, free-form phone text
    pub whatsapp: String,

    /// Street address
    pub address: String,

    /// City name
    #[serde(default, deserialize_with = "non_empty")]
    pub city: Option<String>,

    /// Region code
    #[serde(default, deserialize_with = "non_empty")]
    pub state: Option<String>,

    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Daily opening time
    #[serde(default, deserialize_with = "lenient_time")]
    pub opening_time: Option<TimeOfDay>,

    /// Daily closing time
    #[serde(default, deserialize_with = "lenient_time")]
    pub closing_time: Option<TimeOfDay>,

    /// Days the store claims to be open
    #[serde(default)]
    pub operating_days: OperatingDays,

    /// When the store was created
    pub created_at: Timestamp,

    /// When the store was last updated
    pub updated_at: Timestamp,
}

impl Store {
    /// Location, when both latitude and longitude are known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    /// Opening hours and operating days.
    pub fn hours(&self) -> StoreHours {
        StoreHours::new(
            self.opening_time,
            self.closing_time,
            self.operating_days.clone(),
        )
    }

    /// The public subset of this store.
    pub fn profile(&self) -> StoreProfile {
        StoreProfile {
            name: self.name.clone(),
            whatsapp: self.whatsapp.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            operating_days: self.operating_days.clone(),
        }
    }
}

/// Store fields joined onto every catalog product and copied into cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    /// Display name
    pub name: String,

    /// Messaging contact handle
    #[serde(default)]
    pub whatsapp: String,

    /// Street address
    #[serde(default)]
    pub address: String,

    /// City name
    #[serde(default, deserialize_with = "non_empty")]
    pub city: Option<String>,

    /// Latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Daily opening time
    #[serde(default, deserialize_with = "lenient_time")]
    pub opening_time: Option<TimeOfDay>,

    /// Daily closing time
    #[serde(default, deserialize_with = "lenient_time")]
    pub closing_time: Option<TimeOfDay>,

    /// Days the store claims to be open
    #[serde(default)]
    pub operating_days: OperatingDays,
}

impl StoreProfile {
    /// Location, when both latitude and longitude are known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    /// Opening hours and operating days.
    pub fn hours(&self) -> StoreHours {
        StoreHours::new(
            self.opening_time,
            self.closing_time,
            self.operating_days.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::hours::OperatingDay;

    use super::*;

    #[test]
    fn store_rows_are_normalised_on_decode() -> TestResult {
        let store: Store = serde_json::from_str(
            r#"{
                "id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5a",
                "user_id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5b",
                "name": "Loja Centro",
                "whatsapp": "(11) 98765-4321",
                "address": "Rua A, 10",
                "city": "",
                "state": "SP",
                "latitude": -23.55,
                "longitude": null,
                "opening_time": "09:00:00",
                "closing_time": "not a time",
                "operating_days": {"monday": true},
                "created_at": "2025-01-01T12:00:00Z",
                "updated_at": "2025-01-01T12:00:00Z"
            }"#,
        )?;

        assert_eq!(store.city, None);
        assert_eq!(store.coordinates(), None);
        assert_eq!(store.opening_time, Some(TimeOfDay::parse("09:00")?));
        assert_eq!(store.closing_time, None);
        assert!(store.operating_days.is_empty());

        Ok(())
    }

    #[test]
    fn profile_defaults_missing_columns() -> TestResult {
        let profile: StoreProfile = serde_json::from_str(
            r#"{"name": "Loja", "operating_days": ["saturday", "sunday"]}"#,
        )?;

        assert_eq!(profile.whatsapp, "");
        assert_eq!(profile.coordinates(), None);
        assert!(profile.hours().operates_on(OperatingDay::Sunday));
        assert!(!profile.hours().operates_on(OperatingDay::Monday));

        Ok(())
    }

    #[test]
    fn profile_round_trips_times_with_seconds() -> TestResult {
        let profile = StoreProfile {
            name: "Loja".to_string(),
            opening_time: Some(TimeOfDay::parse("08:30")?),
            ..StoreProfile::default()
        };

        let json = serde_json::to_value(&profile)?;

        assert_eq!(json.get("opening_time"), Some(&"08:30:00".into()));
        assert_eq!(json.get("closing_time"), Some(&serde_json::Value::Null));

        Ok(())
    }
}
