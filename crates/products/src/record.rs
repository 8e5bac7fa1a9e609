//! Store-level records: the decomposed form of a [`Product`](crate::Product).
//!
//! A product is stored as one flat [`ProductRecord`] plus any number of review,
//! image and tag records keyed by the owning product id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::ProductId;

/// Whether a core record save is a first write or an overwrite.
///
/// This is advisory: stores perform an upsert keyed by id either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    #[default]
    Insert,
    Update,
}

impl WriteMode {
    pub fn is_insert(self) -> bool {
        self == WriteMode::Insert
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Insert => "insert",
            WriteMode::Update => "update",
        }
    }
}

/// Flat scalar portion of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub discount_percentage: Option<f64>,
    pub rating: Option<f64>,
    pub stock: i32,
    pub brand: String,
    pub sku: String,
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub warranty_information: String,
    pub shipping_information: String,
    pub availability_status: String,
    pub return_policy: String,
    pub minimum_order_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub barcode: String,
    pub qr_code: String,
    pub thumbnail: String,
    /// Not persisted.
    #[serde(skip)]
    pub write_mode: WriteMode,
}

/// A record owned by a product and looked up by its id.
pub trait DependentRecord: Clone + Send + Sync + 'static {
    fn product_id(&self) -> ProductId;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub product_id: ProductId,
    pub rating: Option<f64>,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub reviewer_name: String,
    pub reviewer_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub product_id: ProductId,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub product_id: ProductId,
    pub tag: String,
}

impl DependentRecord for ReviewRecord {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl DependentRecord for ImageRecord {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl DependentRecord for TagRecord {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}
