//! Field-level validation of products arriving from outside (feed, callers).

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::product::{Product, Review};

/// Keys that decode to a default when absent but must still be present on the wire.
const REQUIRED_KEYS: [(&str, &str); 3] = [
    ("dimensions", "Dimensions are required."),
    ("reviews", "Reviews are required."),
    ("meta", "Meta information is required."),
];

/// A single field-level rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire-level path, e.g. `dimensions.width` or `reviews[0].reviewerEmail`.
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Join violations as `field: message, field: message`.
    pub fn join(violations: &[Violation]) -> String {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Presence rules checked on the raw entry, before decoding. A key set to `null`
/// counts as missing; an empty list does not.
pub fn missing_required(entry: &JsonValue) -> Vec<Violation> {
    REQUIRED_KEYS
        .iter()
        .filter(|(key, _)| entry.get(key).is_none_or(JsonValue::is_null))
        .map(|(key, message)| Violation::new(*key, *message))
        .collect()
}

/// Validation collaborator. An empty result means the product is valid.
pub trait ProductValidator: Send + Sync {
    fn validate(&self, product: &Product) -> Vec<Violation>;
}

/// Default rule set for catalog products.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl RuleValidator {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn fail(&mut self, field: impl Into<String>, message: &str) {
        self.violations.push(Violation::new(field, message));
    }

    fn not_blank(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    fn max_chars(&mut self, field: &str, value: &str, max: usize, message: &str) {
        if value.chars().count() > max {
            self.fail(field, message);
        }
    }

    fn positive(&mut self, field: &str, value: f64, message: &str) {
        if !(value > 0.0) {
            self.fail(field, message);
        }
    }

    fn in_range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64, low: &str, high: &str) {
        if let Some(v) = value {
            if !(v >= min) {
                self.fail(field, low);
            } else if v > max {
                self.fail(field, high);
            }
        }
    }

    fn non_empty_items(&mut self, field: &str, items: &[String], empty: &str, blank_item: &str) {
        if items.is_empty() {
            self.fail(field, empty);
        }
        for (i, item) in items.iter().enumerate() {
            if item.trim().is_empty() {
                self.fail(format!("{field}[{i}]"), blank_item);
            }
        }
    }

    fn review(&mut self, i: usize, review: &Review) {
        let path = |name: &str| format!("reviews[{i}].{name}");
        self.in_range(
            &path("rating"),
            review.rating,
            0.0,
            5.0,
            "Rating must be 0 or higher.",
            "Rating must be 5 or less.",
        );
        self.not_blank(&path("comment"), &review.comment, "Review comment cannot be empty.");
        self.not_blank(&path("reviewerName"), &review.reviewer_name, "Reviewer name cannot be empty.");
        if review.reviewer_email.trim().is_empty() {
            self.fail(path("reviewerEmail"), "Reviewer email cannot be empty.");
        } else if !looks_like_email(&review.reviewer_email) {
            self.fail(path("reviewerEmail"), "Invalid email format.");
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !domain.starts_with('.')
        }
        None => false,
    }
}

impl ProductValidator for RuleValidator {
    fn validate(&self, p: &Product) -> Vec<Violation> {
        let mut c = Checker::default();

        c.not_blank("title", &p.title, "Product title cannot be empty.");
        c.max_chars("title", &p.title, 100, "Product title must not exceed 100 characters.");
        c.not_blank("description", &p.description, "Product description cannot be empty.");
        c.max_chars(
            "description",
            &p.description,
            500,
            "Product description must not exceed 500 characters.",
        );
        c.not_blank("category", &p.category, "Category is required.");
        c.positive("price", p.price, "Price must be greater than 0.");
        c.in_range(
            "discountPercentage",
            p.discount_percentage,
            0.0,
            100.0,
            "Discount percentage must be 0 or higher.",
            "Discount percentage must be 100 or less.",
        );
        c.in_range("rating", p.rating, 0.0, 5.0, "Rating must be 0 or higher.", "Rating must be 5 or less.");
        if p.stock < 0 {
            c.fail("stock", "Stock cannot be negative.");
        }
        c.non_empty_items("tags", &p.tags, "Tags cannot be empty.", "Each tag cannot be empty.");
        c.not_blank("brand", &p.brand, "Brand is required.");
        c.not_blank("sku", &p.sku, "SKU is required.");
        c.positive("weight", p.weight, "Weight must be greater than 0.");
        c.positive("dimensions.width", p.dimensions.width, "Width must be greater than 0.");
        c.positive("dimensions.height", p.dimensions.height, "Height must be greater than 0.");
        c.positive("dimensions.depth", p.dimensions.depth, "Depth must be greater than 0.");
        c.not_blank(
            "warrantyInformation",
            &p.warranty_information,
            "Warranty information cannot be empty.",
        );
        c.not_blank(
            "shippingInformation",
            &p.shipping_information,
            "Shipping information cannot be empty.",
        );
        c.not_blank(
            "availabilityStatus",
            &p.availability_status,
            "Availability status is required.",
        );
        for (i, review) in p.reviews.iter().enumerate() {
            c.review(i, review);
        }
        c.not_blank("returnPolicy", &p.return_policy, "Return policy cannot be empty.");
        if p.minimum_order_quantity <= 0 {
            c.fail("minimumOrderQuantity", "Minimum order quantity must be greater than 0.");
        }
        c.not_blank("meta.barcode", &p.meta.barcode, "Barcode is required.");
        c.not_blank("meta.qrCode", &p.meta.qr_code, "QR code URL cannot be empty.");
        c.non_empty_items(
            "images",
            &p.images,
            "At least one image is required.",
            "Image URL cannot be empty.",
        );
        c.not_blank("thumbnail", &p.thumbnail, "Thumbnail URL cannot be empty.");

        c.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Dimensions, Metadata};
    use catalog_core::ProductId;
    use chrono::Utc;

    fn valid_product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Widget".to_string(),
            description: "A widget.".to_string(),
            category: "tools".to_string(),
            price: 9.99,
            discount_percentage: None,
            rating: Some(4.5),
            stock: 0,
            tags: vec!["metal".to_string()],
            brand: "Acme".to_string(),
            sku: "W-1".to_string(),
            weight: 1.0,
            dimensions: Dimensions { width: 1.0, height: 1.0, depth: 1.0 },
            warranty_information: "1 year".to_string(),
            shipping_information: "Ships fast".to_string(),
            availability_status: "In Stock".to_string(),
            reviews: vec![Review {
                rating: Some(5.0),
                comment: "Great".to_string(),
                date: Utc::now(),
                reviewer_name: "Ann".to_string(),
                reviewer_email: "ann@example.com".to_string(),
            }],
            return_policy: "30 days".to_string(),
            minimum_order_quantity: 1,
            meta: Metadata {
                created_at: Utc::now(),
                updated_at: Utc::now(),
                barcode: "123".to_string(),
                qr_code: "https://qr".to_string(),
            },
            images: vec!["https://img/1.png".to_string()],
            thumbnail: "https://img/t.png".to_string(),
        }
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn valid_product_has_no_violations() {
        assert!(RuleValidator::new().validate(&valid_product()).is_empty());
    }

    #[test]
    fn blank_title_is_reported() {
        let mut p = valid_product();
        p.title = "  ".to_string();

        let violations = RuleValidator::new().validate(&p);
        assert_eq!(violations, vec![Violation::new("title", "Product title cannot be empty.")]);
    }

    #[test]
    fn numeric_bounds_are_checked() {
        let mut p = valid_product();
        p.price = 0.0;
        p.stock = -1;
        p.discount_percentage = Some(120.0);
        p.minimum_order_quantity = 0;
        p.dimensions.depth = -2.0;

        let violations = RuleValidator::new().validate(&p);
        assert_eq!(
            fields(&violations),
            vec!["price", "discountPercentage", "stock", "dimensions.depth", "minimumOrderQuantity"]
        );
    }

    #[test]
    fn empty_and_blank_collections_are_reported() {
        let mut p = valid_product();
        p.tags.clear();
        p.images = vec!["".to_string()];

        let violations = RuleValidator::new().validate(&p);
        assert_eq!(fields(&violations), vec!["tags", "images[0]"]);
    }

    #[test]
    fn review_fields_use_indexed_paths() {
        let mut p = valid_product();
        p.reviews[0].reviewer_email = "not-an-email".to_string();
        p.reviews[0].rating = Some(6.0);

        let violations = RuleValidator::new().validate(&p);
        assert_eq!(fields(&violations), vec!["reviews[0].rating", "reviews[0].reviewerEmail"]);
        assert_eq!(violations[1].message, "Invalid email format.");
    }

    #[test]
    fn join_formats_field_and_message() {
        let joined = Violation::join(&[
            Violation::new("title", "Product title cannot be empty."),
            Violation::new("sku", "SKU is required."),
        ]);
        assert_eq!(joined, "title: Product title cannot be empty., sku: SKU is required.");
    }

    #[test]
    fn missing_reviews_key_is_reported() {
        let mut entry = serde_json::to_value(valid_product()).unwrap();
        assert!(missing_required(&entry).is_empty());

        entry.as_object_mut().unwrap().remove("reviews");
        assert_eq!(
            missing_required(&entry),
            vec![Violation::new("reviews", "Reviews are required.")]
        );
    }

    #[test]
    fn null_counts_as_missing_but_empty_list_does_not() {
        let mut entry = serde_json::to_value(valid_product()).unwrap();
        entry["reviews"] = serde_json::json!([]);
        assert!(missing_required(&entry).is_empty());

        entry["reviews"] = JsonValue::Null;
        entry.as_object_mut().unwrap().remove("meta");
        assert_eq!(fields(&missing_required(&entry)), vec!["reviews", "meta"]);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b"));
        assert!(looks_like_email("john.doe@x.dummyjson.com"));
        assert!(!looks_like_email("john doe@x.com"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("john@"));
        assert!(!looks_like_email("a@b@c"));
    }
}
