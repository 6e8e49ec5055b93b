use serde::{Deserialize, Serialize};

/// Owner of a bike under repair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Assigned by the store on first save, never reassigned
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

impl Customer {
    pub fn new(customer_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            customer_name: Some(customer_name.into()),
            phone_number: Some(phone_number.into()),
            ..Default::default()
        }
    }
}
