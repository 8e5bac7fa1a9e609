//! Pure mapping between the aggregate and its store-level records.

use catalog_core::ProductId;

use crate::product::{Dimensions, Metadata, Product, Review};
use crate::record::{ImageRecord, ProductRecord, ReviewRecord, TagRecord, WriteMode};

impl Product {
    /// Flatten the embedded dimensions and metadata into a core record.
    ///
    /// The record starts out as an insert; the caller stamps the real mode.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price,
            discount_percentage: self.discount_percentage,
            rating: self.rating,
            stock: self.stock,
            brand: self.brand.clone(),
            sku: self.sku.clone(),
            weight: self.weight,
            width: self.dimensions.width,
            height: self.dimensions.height,
            depth: self.dimensions.depth,
            warranty_information: self.warranty_information.clone(),
            shipping_information: self.shipping_information.clone(),
            availability_status: self.availability_status.clone(),
            return_policy: self.return_policy.clone(),
            minimum_order_quantity: self.minimum_order_quantity,
            created_at: self.meta.created_at,
            updated_at: self.meta.updated_at,
            barcode: self.meta.barcode.clone(),
            qr_code: self.meta.qr_code.clone(),
            thumbnail: self.thumbnail.clone(),
            write_mode: WriteMode::Insert,
        }
    }

    /// Review records stamped with `owner` as their product id.
    pub fn review_records(&self, owner: ProductId) -> Vec<ReviewRecord> {
        self.reviews
            .iter()
            .map(|r| ReviewRecord {
                product_id: owner,
                rating: r.rating,
                comment: r.comment.clone(),
                date: r.date,
                reviewer_name: r.reviewer_name.clone(),
                reviewer_email: r.reviewer_email.clone(),
            })
            .collect()
    }

    pub fn image_records(&self, owner: ProductId) -> Vec<ImageRecord> {
        self.images
            .iter()
            .map(|url| ImageRecord {
                product_id: owner,
                image_url: url.clone(),
            })
            .collect()
    }

    pub fn tag_records(&self, owner: ProductId) -> Vec<TagRecord> {
        self.tags
            .iter()
            .map(|tag| TagRecord {
                product_id: owner,
                tag: tag.clone(),
            })
            .collect()
    }

    /// Join a core record with its dependent collections.
    pub fn from_parts(
        record: ProductRecord,
        reviews: Vec<ReviewRecord>,
        images: Vec<ImageRecord>,
        tags: Vec<TagRecord>,
    ) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            price: record.price,
            discount_percentage: record.discount_percentage,
            rating: record.rating,
            stock: record.stock,
            tags: tags.into_iter().map(|t| t.tag).collect(),
            brand: record.brand,
            sku: record.sku,
            weight: record.weight,
            dimensions: Dimensions {
                width: record.width,
                height: record.height,
                depth: record.depth,
            },
            warranty_information: record.warranty_information,
            shipping_information: record.shipping_information,
            availability_status: record.availability_status,
            reviews: reviews
                .into_iter()
                .map(|r| Review {
                    rating: r.rating,
                    comment: r.comment,
                    date: r.date,
                    reviewer_name: r.reviewer_name,
                    reviewer_email: r.reviewer_email,
                })
                .collect(),
            return_policy: record.return_policy,
            minimum_order_quantity: record.minimum_order_quantity,
            meta: Metadata {
                created_at: record.created_at,
                updated_at: record.updated_at,
                barcode: record.barcode,
                qr_code: record.qr_code,
            },
            images: images.into_iter().map(|i| i.image_url).collect(),
            thumbnail: record.thumbnail,
        }
    }
}
