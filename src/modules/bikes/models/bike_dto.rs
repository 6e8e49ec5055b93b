use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bike shape exchanged over HTTP.
///
/// Every field is optional: a create request copies whatever is present, an
/// update request overwrites only the fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeDto {
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
    #[serde(default)]
    pub customer: Option<CustomerDto>,
}

/// Customer shape nested inside [`BikeDto`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub house_no: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
}
