//! Stores Data

use serde::Serialize;

use achei::{
    hours::{OperatingDays, TimeOfDay},
    stores::AccountUuid,
};

/// Store columns written on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreFields {
    pub name: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_time: Option<TimeOfDay>,
    pub closing_time: Option<TimeOfDay>,
    pub operating_days: OperatingDays,
}

/// New Store Data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStore {
    pub user_id: AccountUuid,

    #[serde(flatten)]
    pub fields: StoreFields,
}

/// Store Update Data
pub type StoreUpdate = StoreFields;
