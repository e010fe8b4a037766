use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Listing, ServiceCategory, ServiceType};
use crate::geo::{Coordinate, Located};

/// An unclaimed job posted by a client, waiting for an executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTask {
    pub id: CompactString,
    pub user_id: CompactString,
    pub service_type: ServiceType,
    pub category: ServiceCategory,
    pub description: String,
    pub location: Coordinate,
    pub price: Decimal,
}

impl Located for OpenTask {
    fn location(&self) -> Coordinate {
        self.location
    }
}

impl Listing for OpenTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_category(&self, category: ServiceCategory) -> bool {
        self.category == category
    }
}
