//! Product catalog - the immutable in-memory snapshot of the product table.
//!
//! The catalog is loaded once at process start and serves reads for the
//! process lifetime. There is no update or delete path; restarting the
//! process is the only way to pick up new data.

mod loader;
mod types;

pub use loader::load_catalog;
pub use types::*;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Utc;

/// Immutable product snapshot with an id index.
///
/// Products keep their source (load) order, which is the natural order for
/// unsorted query results and the tie-break order for sorted ones.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    stats: CatalogStats,
}

impl Catalog {
    /// Build a catalog from already-materialized products.
    ///
    /// `load_catalog` is the normal entry point; this is for embedding and
    /// tests. Later duplicates of an id are unreachable through `get`.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::build(products, 0, None)
    }

    pub(crate) fn build(
        products: Vec<Product>,
        skipped_rows: u64,
        source_digest: Option<String>,
    ) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            by_id.entry(product.id.clone()).or_insert(index);
        }

        let stats = Self::compute_stats(&products, skipped_rows, source_digest);

        Self {
            products,
            by_id,
            stats,
        }
    }

    fn compute_stats(
        products: &[Product],
        skipped_rows: u64,
        source_digest: Option<String>,
    ) -> CatalogStats {
        let categories: BTreeSet<&str> = products
            .iter()
            .filter_map(|p| p.category.as_deref())
            .collect();
        let brands: BTreeSet<&str> = products.iter().filter_map(|p| p.brand.as_deref()).collect();

        let mut price_min = None;
        let mut price_max = None;
        for product in products {
            let price = product.price;
            price_min = Some(price_min.map_or(price, |m: f64| m.min(price)));
            price_max = Some(price_max.map_or(price, |m: f64| m.max(price)));
        }

        CatalogStats {
            total_products: products.len() as u64,
            in_stock_count: products.iter().filter(|p| p.in_stock).count() as u64,
            category_count: categories.len() as u64,
            brand_count: brands.len() as u64,
            price_min,
            price_max,
            loaded_at: Utc::now(),
            source_digest,
            skipped_rows,
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&index| &self.products[index])
    }

    /// All products in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories with per-category product counts, sorted by name.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for product in &self.products {
            if let Some(category) = product.category.as_deref() {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect()
    }

    /// Distinct brand names, sorted.
    pub fn brands(&self) -> Vec<String> {
        let brands: BTreeSet<&str> = self
            .products
            .iter()
            .filter_map(|p| p.brand.as_deref())
            .collect();
        brands.into_iter().map(str::to_string).collect()
    }

    /// Lowest and highest price across the catalog, None when empty.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        match (self.stats.price_min, self.stats.price_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Snapshot statistics, fixed at build time.
    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64, category: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            category: category.map(str::to_string),
            brand: None,
            color: None,
            size: None,
            material: None,
            weight: None,
            in_stock: true,
            rating: None,
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::from_products(vec![
            product("P1", "Lamp", 20.0, Some("Home")),
            product("P2", "Chair", 75.0, Some("Home")),
        ]);

        assert_eq!(catalog.get("P2").unwrap().name, "Chair");
        assert!(catalog.get("P999").is_none());
    }

    #[test]
    fn test_categories_sorted_with_counts() {
        let catalog = Catalog::from_products(vec![
            product("P1", "Lamp", 20.0, Some("Home")),
            product("P2", "Keyboard", 50.0, Some("Electronics")),
            product("P3", "Chair", 75.0, Some("Home")),
            product("P4", "Mystery", 5.0, None),
        ]);

        let categories = catalog.categories();
        assert_eq!(
            categories,
            vec![
                CategoryCount {
                    category: "Electronics".to_string(),
                    count: 1
                },
                CategoryCount {
                    category: "Home".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_brands_distinct_and_sorted() {
        let mut a = product("P1", "Lamp", 20.0, None);
        a.brand = Some("Zenith".to_string());
        let mut b = product("P2", "Chair", 75.0, None);
        b.brand = Some("Acme".to_string());
        let mut c = product("P3", "Desk", 150.0, None);
        c.brand = Some("Zenith".to_string());
        let d = product("P4", "Mystery", 5.0, None);

        let catalog = Catalog::from_products(vec![a, b, c, d]);
        assert_eq!(catalog.brands(), vec!["Acme", "Zenith"]);
    }

    #[test]
    fn test_price_bounds() {
        let catalog = Catalog::from_products(vec![
            product("P1", "Lamp", 20.0, None),
            product("P2", "Chair", 75.0, None),
            product("P3", "Pen", 1.5, None),
        ]);

        assert_eq!(catalog.price_bounds(), Some((1.5, 75.0)));
        assert!(Catalog::from_products(vec![]).price_bounds().is_none());
    }

    #[test]
    fn test_stats_counts() {
        let mut a = product("P1", "Lamp", 20.0, Some("Home"));
        a.in_stock = false;
        a.brand = Some("Zenith".to_string());
        let b = product("P2", "Chair", 75.0, Some("Home"));

        let catalog = Catalog::from_products(vec![a, b]);
        let stats = catalog.stats();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.in_stock_count, 1);
        assert_eq!(stats.category_count, 1);
        assert_eq!(stats.brand_count, 1);
        assert_eq!(stats.price_min, Some(20.0));
        assert_eq!(stats.price_max, Some(75.0));
        assert!(stats.source_digest.is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let catalog = Catalog::from_products(vec![
            product("P1", "First", 1.0, None),
            product("P1", "Second", 2.0, None),
        ]);

        assert_eq!(catalog.get("P1").unwrap().name, "First");
    }
}
