//! Product catalog model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Product reference inside a report: a bare id or the populated product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    Product(Product),
}

impl ProductRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Product(product) => &product.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Product(product) => &product.name,
        }
    }
}

/// Create/update payload for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub manufacturer: String,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name is required".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            manufacturer: product.manufacturer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_ref_reads_both_shapes() {
        let refs: Vec<ProductRef> = serde_json::from_str(
            r#"["p1", {"_id": "p2", "name": "Copper fungicide", "price": 12.5}]"#,
        )
        .unwrap();
        assert_eq!(refs[0].id(), "p1");
        assert_eq!(refs[1].id(), "p2");
        assert_eq!(refs[1].label(), "Copper fungicide");
    }

    #[test]
    fn draft_rejects_negative_price() {
        let draft = ProductDraft {
            name: "Neem oil".to_string(),
            price: -1.0,
            ..ProductDraft::default()
        };
        assert!(draft.validate().is_err());
    }
}
