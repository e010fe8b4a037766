//! Read-only catalog of providers, services and open tasks.
//!
//! Discovery and booking code depends on [`CatalogSource`] rather than on a
//! global, so tests can run against arbitrary fixtures.

mod fixtures;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::entities::{OpenTask, Provider, ServiceCategory, ServicePackage};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Read access to the reference data the app renders.
pub trait CatalogSource: Send + Sync {
    fn providers(&self) -> &[Provider];
    fn services(&self) -> &[ServicePackage];
    fn open_tasks(&self) -> &[OpenTask];

    fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers().iter().find(|p| p.id == id)
    }

    fn service(&self, id: &str) -> Option<&ServicePackage> {
        self.services().iter().find(|s| s.id == id)
    }

    fn open_task(&self, id: &str) -> Option<&OpenTask> {
        self.open_tasks().iter().find(|t| t.id == id)
    }

    /// Services offered in a category, in catalog order.
    fn services_in(&self, category: ServiceCategory) -> Vec<&ServicePackage> {
        self.services()
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCatalog {
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub services: Vec<ServicePackage>,
    #[serde(default)]
    pub open_tasks: Vec<OpenTask>,
}

impl StaticCatalog {
    pub fn new(
        providers: Vec<Provider>,
        services: Vec<ServicePackage>,
        open_tasks: Vec<OpenTask>,
    ) -> Self {
        Self {
            providers,
            services,
            open_tasks,
        }
    }

    /// The demo catalog centred on Av. Paulista.
    pub fn builtin() -> Self {
        Self::new(
            fixtures::providers(),
            fixtures::services(),
            fixtures::open_tasks(),
        )
    }

    /// Parse a catalog from JSON text and check id uniqueness.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: StaticCatalog = serde_json::from_str(json)?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&content)?;
        info!(
            path = %path.as_ref().display(),
            providers = catalog.providers.len(),
            services = catalog.services.len(),
            open_tasks = catalog.open_tasks.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn check_unique_ids(&self) -> Result<(), CatalogError> {
        fn check<'a>(
            kind: &'static str,
            ids: impl Iterator<Item = &'a str>,
        ) -> Result<(), CatalogError> {
            let mut seen = std::collections::HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    return Err(CatalogError::DuplicateId {
                        kind,
                        id: id.to_string(),
                    });
                }
            }
            Ok(())
        }

        check("provider", self.providers.iter().map(|p| p.id.as_str()))?;
        check("service", self.services.iter().map(|s| s.id.as_str()))?;
        check("open task", self.open_tasks.iter().map(|t| t.id.as_str()))
    }
}

impl CatalogSource for StaticCatalog {
    fn providers(&self) -> &[Provider] {
        &self.providers
    }

    fn services(&self) -> &[ServicePackage] {
        &self.services
    }

    fn open_tasks(&self) -> &[OpenTask] {
        &self.open_tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(catalog.providers().len(), 4);
        assert_eq!(catalog.services().len(), 5);
        assert_eq!(catalog.open_tasks().len(), 3);
        assert!(catalog.check_unique_ids().is_ok());

        let bank = catalog.service("s1").unwrap();
        assert_eq!(bank.name, "Espera em Banco");
        assert_eq!(bank.price, Decimal::new(3500, 2));
        assert_eq!(catalog.services_in(ServiceCategory::Pet).len(), 3);
        assert!(catalog.provider("p9").is_none());
    }

    #[test]
    fn test_from_json_round_trips_original_shape() {
        let json = r#"{
            "providers": [{
                "id": "p1", "name": "Carlos Silva", "avatar": "a.png",
                "rating": 4.8, "reviews": 124, "verified": true,
                "categories": ["QUEUE"], "hourlyRate": 25,
                "specialties": ["Bancos"], "bio": "Paciência infinita.",
                "location": {"lat": -23.564, "lng": -46.652},
                "status": "available", "level": 3, "xp": 2400,
                "xpToNextLevel": 3000, "completedTasks": 124,
                "badges": [{"id": "b1", "name": "Ninja das Filas",
                            "description": "50+ horas", "icon": "clock"}]
            }],
            "services": [],
            "openTasks": [{
                "id": "t1", "userId": "u1", "serviceType": "BANK_LINE",
                "category": "QUEUE", "description": "Fila Caixa",
                "location": {"lat": -23.562, "lng": -46.654}, "price": 45
            }]
        }"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        let carlos = catalog.provider("p1").unwrap();
        assert!(carlos.offers(ServiceCategory::Queue));
        assert_eq!(carlos.hourly_rate, Some(Decimal::from(25)));
        assert_eq!(catalog.open_task("t1").unwrap().price, Decimal::from(45));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut catalog = StaticCatalog::builtin();
        let dup = catalog.open_tasks[0].clone();
        catalog.open_tasks.push(dup);
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(matches!(
            StaticCatalog::from_json(&json),
            Err(CatalogError::DuplicateId { kind: "open task", .. })
        ));
    }

    #[test]
    fn test_invalid_coordinates_fail_to_parse() {
        let json = r#"{"openTasks": [{
            "id": "t1", "userId": "u1", "serviceType": "BANK_LINE",
            "category": "QUEUE", "description": "x",
            "location": {"lat": -123.0, "lng": 0.0}, "price": 1
        }]}"#;
        assert!(matches!(
            StaticCatalog::from_json(json),
            Err(CatalogError::Parse(_))
        ));
    }
}
