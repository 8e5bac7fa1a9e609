//! Postgres-backed catalog stores.
//!
//! One `PostgresCatalogStore` serves all four store traits from a single pool; each
//! entity kind has its own table and no statement touches more than one of them.
//!
//! ## Tables
//!
//! - `products` (primary key `id`)
//! - `reviews`, `product_images`, `product_tags` (keyed by `product_id`, ordered by a
//!   `seq` identity column so reads return insertion order)

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use catalog_core::ProductId;
use catalog_products::{ImageRecord, ProductRecord, ReviewRecord, SortOrder, TagRecord, WriteMode};

use super::{DependentStore, ProductStore};
use crate::error::{StoreError, StoreResult};

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        match &value {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                StoreError::Decode(value.to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(value.to_string())
            }
            _ => StoreError::Backend(value.to_string()),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGINT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        discount_percentage DOUBLE PRECISION,
        rating DOUBLE PRECISION,
        stock INTEGER NOT NULL,
        brand TEXT NOT NULL,
        sku TEXT NOT NULL,
        weight DOUBLE PRECISION NOT NULL,
        width DOUBLE PRECISION NOT NULL,
        height DOUBLE PRECISION NOT NULL,
        depth DOUBLE PRECISION NOT NULL,
        warranty_information TEXT NOT NULL,
        shipping_information TEXT NOT NULL,
        availability_status TEXT NOT NULL,
        return_policy TEXT NOT NULL,
        minimum_order_quantity INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL,
        barcode TEXT NOT NULL,
        qr_code TEXT NOT NULL,
        thumbnail TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        seq BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        product_id BIGINT NOT NULL,
        rating DOUBLE PRECISION,
        comment TEXT NOT NULL,
        date TIMESTAMPTZ NOT NULL,
        reviewer_name TEXT NOT NULL,
        reviewer_email TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_images (
        seq BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        product_id BIGINT NOT NULL,
        image_url TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_tags (
        seq BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        product_id BIGINT NOT NULL,
        tag TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_product_id_idx ON reviews (product_id)",
    "CREATE INDEX IF NOT EXISTS product_images_product_id_idx ON product_images (product_id)",
    "CREATE INDEX IF NOT EXISTS product_tags_product_id_idx ON product_tags (product_id)",
];

const PRODUCT_COLUMNS: &str = "id, title, description, category, price, discount_percentage, \
    rating, stock, brand, sku, weight, width, height, depth, warranty_information, \
    shipping_information, availability_status, return_policy, minimum_order_quantity, \
    created_at, updated_at, barcode, qr_code, thumbnail";

/// Postgres-backed store for products and their dependents.
///
/// Uses the SQLx connection pool, which is cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and create the catalog tables if missing.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<ProductRecord, sqlx::Error> {
    Ok(ProductRecord {
        id: ProductId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        price: row.try_get("price")?,
        discount_percentage: row.try_get("discount_percentage")?,
        rating: row.try_get("rating")?,
        stock: row.try_get("stock")?,
        brand: row.try_get("brand")?,
        sku: row.try_get("sku")?,
        weight: row.try_get("weight")?,
        width: row.try_get("width")?,
        height: row.try_get("height")?,
        depth: row.try_get("depth")?,
        warranty_information: row.try_get("warranty_information")?,
        shipping_information: row.try_get("shipping_information")?,
        availability_status: row.try_get("availability_status")?,
        return_policy: row.try_get("return_policy")?,
        minimum_order_quantity: row.try_get("minimum_order_quantity")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        barcode: row.try_get("barcode")?,
        qr_code: row.try_get("qr_code")?,
        thumbnail: row.try_get("thumbnail")?,
        write_mode: WriteMode::Update,
    })
}

fn products_from_rows(rows: Vec<PgRow>) -> StoreResult<Vec<ProductRecord>> {
    rows.iter()
        .map(|row| product_from_row(row).map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl ProductStore for PostgresCatalogStore {
    async fn save(&self, record: ProductRecord) -> StoreResult<ProductRecord> {
        // The write mode is advisory; the upsert is authoritative either way.
        debug!(product_id = %record.id, mode = record.write_mode.as_str(), "upserting product");

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products ({PRODUCT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                price = EXCLUDED.price,
                discount_percentage = EXCLUDED.discount_percentage,
                rating = EXCLUDED.rating,
                stock = EXCLUDED.stock,
                brand = EXCLUDED.brand,
                sku = EXCLUDED.sku,
                weight = EXCLUDED.weight,
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                depth = EXCLUDED.depth,
                warranty_information = EXCLUDED.warranty_information,
                shipping_information = EXCLUDED.shipping_information,
                availability_status = EXCLUDED.availability_status,
                return_policy = EXCLUDED.return_policy,
                minimum_order_quantity = EXCLUDED.minimum_order_quantity,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at,
                barcode = EXCLUDED.barcode,
                qr_code = EXCLUDED.qr_code,
                thumbnail = EXCLUDED.thumbnail
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(record.id.get())
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.category)
        .bind(record.price)
        .bind(record.discount_percentage)
        .bind(record.rating)
        .bind(record.stock)
        .bind(&record.brand)
        .bind(&record.sku)
        .bind(record.weight)
        .bind(record.width)
        .bind(record.height)
        .bind(record.depth)
        .bind(&record.warranty_information)
        .bind(&record.shipping_information)
        .bind(&record.availability_status)
        .bind(&record.return_policy)
        .bind(record.minimum_order_quantity)
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(&record.barcode)
        .bind(&record.qr_code)
        .bind(&record.thumbnail)
        .fetch_one(&self.pool)
        .await?;

        let mut saved = product_from_row(&row)?;
        saved.write_mode = record.write_mode;
        Ok(saved)
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<ProductRecord>> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(product_from_row).transpose()?)
    }

    async fn find_by_sku(&self, sku: &str) -> StoreResult<Option<ProductRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1 ORDER BY id LIMIT 1"
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(product_from_row).transpose()?)
    }

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<ProductRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        products_from_rows(rows)
    }

    async fn find_all_sorted(&self, order: SortOrder) -> StoreResult<Vec<ProductRecord>> {
        let sql = match order {
            SortOrder::Asc => format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY price ASC, id ASC"),
            SortOrder::Desc => format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY price DESC, id DESC"),
        };
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        products_from_rows(rows)
    }

    async fn find_all(&self) -> StoreResult<Vec<ProductRecord>> {
        let rows = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        products_from_rows(rows)
    }
}

#[async_trait]
impl DependentStore<ReviewRecord> for PostgresCatalogStore {
    async fn save(&self, record: ReviewRecord) -> StoreResult<ReviewRecord> {
        sqlx::query(
            r#"
            INSERT INTO reviews (product_id, rating, comment, date, reviewer_name, reviewer_email)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.product_id.get())
        .bind(record.rating)
        .bind(&record.comment)
        .bind(record.date)
        .bind(&record.reviewer_name)
        .bind(&record.reviewer_email)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<ReviewRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, rating, comment, date, reviewer_name, reviewer_email
            FROM reviews
            WHERE product_id = $1
            ORDER BY seq
            "#,
        )
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ReviewRecord, sqlx::Error> {
                Ok(ReviewRecord {
                    product_id: ProductId::new(row.try_get("product_id")?),
                    rating: row.try_get("rating")?,
                    comment: row.try_get("comment")?,
                    date: row.try_get("date")?,
                    reviewer_name: row.try_get("reviewer_name")?,
                    reviewer_email: row.try_get("reviewer_email")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl DependentStore<ImageRecord> for PostgresCatalogStore {
    async fn save(&self, record: ImageRecord) -> StoreResult<ImageRecord> {
        sqlx::query("INSERT INTO product_images (product_id, image_url) VALUES ($1, $2)")
            .bind(record.product_id.get())
            .bind(&record.image_url)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<ImageRecord>> {
        let rows = sqlx::query(
            "SELECT product_id, image_url FROM product_images WHERE product_id = $1 ORDER BY seq",
        )
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ImageRecord, sqlx::Error> {
                Ok(ImageRecord {
                    product_id: ProductId::new(row.try_get("product_id")?),
                    image_url: row.try_get("image_url")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl DependentStore<TagRecord> for PostgresCatalogStore {
    async fn save(&self, record: TagRecord) -> StoreResult<TagRecord> {
        sqlx::query("INSERT INTO product_tags (product_id, tag) VALUES ($1, $2)")
            .bind(record.product_id.get())
            .bind(&record.tag)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<TagRecord>> {
        let rows = sqlx::query(
            "SELECT product_id, tag FROM product_tags WHERE product_id = $1 ORDER BY seq",
        )
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<TagRecord, sqlx::Error> {
                Ok(TagRecord {
                    product_id: ProductId::new(row.try_get("product_id")?),
                    tag: row.try_get("tag")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::from)
    }
}
