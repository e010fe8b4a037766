//! Marketplace entities: providers, service packages, open tasks, bookings.
//!
//! These are plain read-only values. Distances are never stored on them;
//! the geo engine computes them against the current reference point.

pub mod booking;
pub mod gamification;
pub mod open_task;
pub mod provider;
pub mod service_package;

pub use booking::{Booking, BookingStatus, UserStats};
pub use gamification::{Badge, BadgeIcon, LevelProgress};
pub use open_task::OpenTask;
pub use provider::{Provider, ProviderStatus};
pub use service_package::ServicePackage;

use crate::geo::{Coordinate, Located};
use serde::{Deserialize, Serialize};

/// The two marketplace verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceCategory {
    /// "Fila & Espera": someone waits in line for you.
    Queue,
    /// Pet walking and care.
    Pet,
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceCategory::Queue => write!(f, "QUEUE"),
            ServiceCategory::Pet => write!(f, "PET"),
        }
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" | "fila" => Ok(ServiceCategory::Queue),
            "pet" => Ok(ServiceCategory::Pet),
            other => Err(format!("unknown service category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    BankLine,
    TicketLine,
    GovBureaucracy,
    SpotHolder,
    Walk30,
    Walk60,
    WalkPremium,
    PetVisit,
}

impl ServiceType {
    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::BankLine => "Fila de Banco",
            ServiceType::TicketLine => "Compra de Ingressos",
            ServiceType::GovBureaucracy => "Repartição Pública",
            ServiceType::SpotHolder => "Segurar Lugar",
            ServiceType::Walk30 => "Passeio 30min",
            ServiceType::Walk60 => "Passeio 60min",
            ServiceType::WalkPremium => "Passeio Premium Monitorado",
            ServiceType::PetVisit => "Visita Rápida (Xixi/Comida)",
        }
    }

    pub fn category(&self) -> ServiceCategory {
        match self {
            ServiceType::BankLine
            | ServiceType::TicketLine
            | ServiceType::GovBureaucracy
            | ServiceType::SpotHolder => ServiceCategory::Queue,
            ServiceType::Walk30
            | ServiceType::Walk60
            | ServiceType::WalkPremium
            | ServiceType::PetVisit => ServiceCategory::Pet,
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Capability shared by everything the discovery screens can list.
pub trait Listing: Located {
    fn id(&self) -> &str;
    fn matches_category(&self, category: ServiceCategory) -> bool;
}

/// Either variant of a located entity, for callers that mix them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocatedEntity<'a> {
    Provider(&'a Provider),
    OpenTask(&'a OpenTask),
}

impl Located for LocatedEntity<'_> {
    fn location(&self) -> Coordinate {
        match self {
            LocatedEntity::Provider(p) => p.location,
            LocatedEntity::OpenTask(t) => t.location,
        }
    }
}

impl Listing for LocatedEntity<'_> {
    fn id(&self) -> &str {
        match self {
            LocatedEntity::Provider(p) => &p.id,
            LocatedEntity::OpenTask(t) => &t.id,
        }
    }

    fn matches_category(&self, category: ServiceCategory) -> bool {
        match self {
            LocatedEntity::Provider(p) => p.matches_category(category),
            LocatedEntity::OpenTask(t) => t.matches_category(category),
        }
    }
}
