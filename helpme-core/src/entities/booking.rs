use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Provider, ServicePackage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

/// A client's reservation of a service with a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub provider_id: CompactString,
    pub service_id: CompactString,
    #[serde(with = "time::serde::rfc3339")]
    pub date: time::OffsetDateTime,
    pub status: BookingStatus,
    pub total_price: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    /// AI-generated summary attached after completion.
    #[serde(default)]
    pub report: Option<String>,
}

impl Booking {
    /// Start a pending booking priced at the package price.
    pub fn new(
        provider: &Provider,
        service: &ServicePackage,
        date: time::OffsetDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id: provider.id.clone(),
            service_id: service.id.clone(),
            date,
            status: BookingStatus::Pending,
            total_price: service.price,
            notes,
            report: None,
        }
    }

    pub fn activate(&mut self) {
        if self.status == BookingStatus::Pending {
            self.status = BookingStatus::Active;
        }
    }

    /// Mark the booking completed and attach the report text.
    pub fn complete(&mut self, report: impl Into<String>) {
        self.status = BookingStatus::Completed;
        self.report = Some(report.into());
    }

    pub fn cancel(&mut self) {
        if self.status != BookingStatus::Completed {
            self.status = BookingStatus::Cancelled;
        }
    }
}

/// Running totals shown on the client's home screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub hours_saved: f64,
    pub money_spent: Decimal,
    pub tasks_completed: u32,
}

impl UserStats {
    /// Fold a completed booking into the totals.
    pub fn record(&mut self, booking: &Booking, service: &ServicePackage) {
        if booking.status != BookingStatus::Completed {
            return;
        }
        self.hours_saved += f64::from(service.duration_minutes) / 60.0;
        self.money_spent += booking.total_price;
        self.tasks_completed += 1;
    }
}
