use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Display name used in error messages, e.g. "Resource with id 7 not found".
pub const ENTITY_NAME: &str = "Resource";

/// A persisted catalogue entry. `id` is assigned by the store on insert and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// Creation payload: everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Partial update payload; only present fields replace stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl NewResource {
    /// Required fields must be non-blank; numeric fields non-negative.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("title", &self.title)?;
        validate_required("author", &self.author)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }

    /// Materialize into a `Resource` once the store has picked an id.
    pub fn into_resource(self, id: u64) -> Resource {
        Resource {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
            stock: self.stock,
        }
    }
}

impl ResourcePatch {
    /// Fields that are present must satisfy the same rules as on create.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(title) = &self.title {
            validate_required("title", title)?;
        }
        if let Some(author) = &self.author {
            validate_required("author", author)?;
        }
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

impl Resource {
    /// Merge a patch field-by-field; absent fields keep their stored value.
    pub fn apply(&mut self, patch: ResourcePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(stock) = patch.stock {
            self.stock = Some(stock);
        }
    }
}

fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<(), ModelError> {
    if let Some(p) = price {
        if !p.is_finite() || p < 0.0 {
            return Err(ModelError::Validation("price must be >= 0".into()));
        }
    }
    Ok(())
}

fn validate_stock(stock: Option<i64>) -> Result<(), ModelError> {
    if let Some(s) = stock {
        if s < 0 {
            return Err(ModelError::Validation("stock must be >= 0".into()));
        }
    }
    Ok(())
}
