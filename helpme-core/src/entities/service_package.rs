use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ServiceCategory, ServiceType};

/// A bookable, fixed-price service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    pub id: CompactString,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub category: ServiceCategory,
    pub name: String,
    pub duration_minutes: u32,
    pub price: Decimal,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}
