//! Catalog types.
//!
//! The catalog is supplied externally as JSON (`{ "packaging": [...] }`) and
//! is read-only: pricing always receives it as an explicitly-passed snapshot
//! and never mutates it. Field names match the legacy data file.

use serde::{Deserialize, Serialize};

use super::price::Rupiah;

/// Promotional metadata attached to a catalog pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackPromo {
    /// Marketing line shown on the gallery tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_text: Option<String>,
    /// First-purchase discount as a fraction in `[0, 1]`.
    #[serde(default)]
    pub first_time_discount: f64,
}

/// A purchasable pack of trading cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPack {
    /// Catalog key, unique within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base price in whole rupiah.
    pub price: Rupiah,
    /// Cards per pack.
    pub quantity: u32,
    /// Gallery image path.
    #[serde(default)]
    pub image: String,
    /// Long description for the pack modal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional promotion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PackPromo>,
}

/// An immutable catalog snapshot.
///
/// Wire shape: `{ "packaging": [CatalogPack, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub packaging: Vec<CatalogPack>,
}

impl Catalog {
    /// Look up a pack by its catalog key.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CatalogPack> {
        self.packaging.iter().find(|p| p.id == id)
    }

    /// Whether the catalog has no packs.
    ///
    /// An empty catalog is treated as a load failure by the storefront.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packaging.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_wire_shape() {
        let json = r#"{
            "packaging": [
                {
                    "id": "starter",
                    "name": "Starter Pack",
                    "price": 100000,
                    "quantity": 5,
                    "image": "assets/img/starter.webp",
                    "promo": { "promo_text": "Diskon pembeli pertama", "first_time_discount": 0.1 }
                },
                { "id": "booster", "name": "Booster Pack", "price": 50000, "quantity": 3 }
            ]
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.packaging.len(), 2);

        let starter = catalog.find("starter").unwrap();
        assert_eq!(starter.price, Rupiah::new(100_000));
        assert_eq!(starter.quantity, 5);
        let promo = starter.promo.as_ref().unwrap();
        assert!((promo.first_time_discount - 0.1).abs() < f64::EPSILON);

        let booster = catalog.find("booster").unwrap();
        assert!(booster.promo.is_none());
        assert!(booster.description.is_none());
    }

    #[test]
    fn test_find_unknown_id() {
        let catalog = Catalog::default();
        assert!(catalog.find("starter").is_none());
        assert!(catalog.is_empty());
    }
}
