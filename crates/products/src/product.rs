use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use catalog_core::{DomainError, DomainResult, ProductId};

/// Physical dimensions embedded in a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Catalog bookkeeping embedded in a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub qr_code: String,
}

/// A customer review embedded in a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Aggregate: the externally visible product.
///
/// A product is persisted as one core record plus three dependent collections
/// (reviews, images, tags). Only this composite is exposed to callers.
///
/// Text and collection fields default to empty when absent on the wire so that the
/// validator can report them by field; numeric fields and the id are required to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    pub stock: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default)]
    pub availability_status: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub return_policy: String,
    pub minimum_order_quantity: i32,
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
}

impl Product {
    /// Decode a single feed entry.
    ///
    /// A value that does not have the shape of a product is a validation failure of
    /// that entry only.
    pub fn from_value(value: JsonValue) -> DomainResult<Self> {
        serde_json::from_value(value).map_err(|e| DomainError::validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed_entry() -> JsonValue {
        json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "sku": "RCH45Q1A",
            "weight": 2,
            "dimensions": { "width": 23.17, "height": 14.43, "depth": 28.01 },
            "warrantyInformation": "1 month warranty",
            "shippingInformation": "Ships in 1 month",
            "availabilityStatus": "Low Stock",
            "reviews": [{
                "rating": 2,
                "comment": "Very unhappy with my purchase!",
                "date": "2024-05-23T08:56:21.618Z",
                "reviewerName": "John Doe",
                "reviewerEmail": "john.doe@x.dummyjson.com"
            }],
            "returnPolicy": "30 days return policy",
            "minimumOrderQuantity": 24,
            "meta": {
                "createdAt": "2024-05-23T08:56:21.618Z",
                "updatedAt": "2024-05-23T08:56:21.618Z",
                "barcode": "9164035109868",
                "qrCode": "https://assets.dummyjson.com/public/qr-code.png"
            },
            "images": ["https://cdn.dummyjson.com/products/images/1.png"],
            "thumbnail": "https://cdn.dummyjson.com/products/images/thumbnail.png"
        })
    }

    #[test]
    fn decodes_camel_case_feed_entry() {
        let product = Product::from_value(feed_entry()).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.sku, "RCH45Q1A");
        assert_eq!(product.weight, 2.0);
        assert_eq!(product.dimensions.depth, 28.01);
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].reviewer_name, "John Doe");
        assert_eq!(product.meta.barcode, "9164035109868");
        assert_eq!(product.discount_percentage, Some(7.17));
    }

    #[test]
    fn missing_text_fields_decode_as_empty() {
        let mut entry = feed_entry();
        entry.as_object_mut().unwrap().remove("brand");
        entry.as_object_mut().unwrap().remove("tags");

        let product = Product::from_value(entry).unwrap();
        assert!(product.brand.is_empty());
        assert!(product.tags.is_empty());
    }

    #[test]
    fn missing_required_number_is_a_validation_error() {
        let mut entry = feed_entry();
        entry.as_object_mut().unwrap().remove("price");

        match Product::from_value(entry).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("price")),
            _ => panic!("Expected Validation error for missing price"),
        }
    }

    #[test]
    fn serializes_back_to_camel_case() {
        let product = Product::from_value(feed_entry()).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["minimumOrderQuantity"], 24);
        assert_eq!(value["meta"]["qrCode"], "https://assets.dummyjson.com/public/qr-code.png");
        assert_eq!(value["reviews"][0]["reviewerEmail"], "john.doe@x.dummyjson.com");
    }
}
