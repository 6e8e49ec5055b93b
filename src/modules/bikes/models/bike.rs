use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::Customer;

/// Persisted record of a bike under repair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    /// Assigned by the store on first save, never reassigned
    #[serde(default)]
    pub bike_id: Option<i64>,
    #[serde(default)]
    pub bike_make: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub bike_registration_number: Option<String>,
    #[serde(default)]
    pub bike_chassis_number: Option<String>,
    #[serde(default)]
    pub known_issues: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub created_date_and_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub given_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_date_and_time: Option<NaiveDateTime>,
    /// Owned one-to-one; saved and deleted together with the bike
    #[serde(default)]
    pub customer: Customer,
}

impl Bike {
    pub fn new(
        bike_make: impl Into<String>,
        model_name: impl Into<String>,
        bike_registration_number: impl Into<String>,
        customer: Customer,
    ) -> Self {
        Self {
            bike_make: Some(bike_make.into()),
            model_name: Some(model_name.into()),
            bike_registration_number: Some(bike_registration_number.into()),
            customer,
            ..Default::default()
        }
    }
}
