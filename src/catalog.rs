use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::data::Product;

const BUNDLED_CATALOG: &str = include_str!("../data/duvets.json");

/// Read-only product catalog, validated on load.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Self::new(products)
    }

    pub fn new(products: Vec<Product>) -> Result<Self> {
        validate(&products)?;
        Ok(Self { products })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("Invalid catalog: {:?}", path))?;
        tracing::info!(path = ?path, products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG).context("Bundled catalog is invalid")
    }

    /// Load `path` when given, otherwise the bundled catalog.
    pub fn open(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(Path::new(path)),
            None => Self::bundled(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.products.iter().map(|p| p.variants.len()).sum()
    }

    /// Look a product up by slug, falling back to id.
    pub fn find(&self, key: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.slug == key)
            .or_else(|| self.products.iter().find(|p| p.id == key))
    }
}

fn validate(products: &[Product]) -> Result<()> {
    let mut ids = HashSet::new();

    for product in products {
        if product.variants.is_empty() {
            anyhow::bail!("Product {} has no variants", product.id);
        }
        if !ids.insert(product.id.as_str()) {
            anyhow::bail!("Duplicate product id: {}", product.id);
        }
        if !(0.0..=5.0).contains(&product.rating) {
            anyhow::bail!(
                "Product {} has rating {} outside 0-5",
                product.id,
                product.rating
            );
        }

        let mut variant_ids = HashSet::new();
        for variant in &product.variants {
            if !variant_ids.insert(variant.id.as_str()) {
                anyhow::bail!(
                    "Product {} has duplicate variant id: {}",
                    product.id,
                    variant.id
                );
            }
        }
    }

    Ok(())
}
