//! Query engine - stateless read operations over the catalog snapshot.
//!
//! Every operation returns a normal value for every input: empty result
//! sets and not-found outcomes are answers, not faults, because the caller
//! has to render a reply either way.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::catalog::{Catalog, CategoryCount, Product};
use crate::config::EngineConfig;
use crate::metrics::{LOOKUP_MISSES, QUERIES_TOTAL, QUERY_DURATION, QUERY_RESULTS};

use super::ranking::rank_score;
use super::types::{
    ProductSummary, QueryError, QueryResult, SearchCriteria, SortKey, SortOrder, StockStatus,
};

/// Read-only query operations over an immutable catalog.
pub struct QueryEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    /// Shuffled product indices, fixed at construction. Featured listings
    /// are prefixes of this order, so repeated calls stay identical.
    featured_order: Vec<usize>,
}

impl QueryEngine {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let seed = config.featured_seed.unwrap_or_else(rand::random);
        let mut featured_order: Vec<usize> = (0..catalog.len()).collect();
        featured_order.shuffle(&mut StdRng::seed_from_u64(seed));

        debug!(products = catalog.len(), seed, "Query engine ready");

        Self {
            catalog,
            config,
            featured_order,
        }
    }

    /// The snapshot this engine reads.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Search with conjunctive optional criteria.
    pub fn search(&self, criteria: &SearchCriteria) -> QueryResult {
        timed("search", || {
            let mut matches = self.filter(criteria);
            if let Some(key) = criteria.sort_by {
                sort_products(&mut matches, key, criteria.order);
            }
            self.truncate(matches, criteria.limit)
        })
    }

    /// Full product record by id.
    pub fn product_details(&self, id: &str) -> Result<Product, QueryError> {
        timed("details", || match self.catalog.get(id) {
            Some(product) => Ok(product.clone()),
            None => {
                LOOKUP_MISSES.with_label_values(&["details"]).inc();
                Err(QueryError::ProductNotFound(id.to_string()))
            }
        })
    }

    /// Stock flag by id.
    pub fn check_stock(&self, id: &str) -> Result<StockStatus, QueryError> {
        timed("stock", || match self.catalog.get(id) {
            Some(product) => Ok(StockStatus {
                product_id: product.id.clone(),
                name: product.name.clone(),
                in_stock: product.in_stock,
            }),
            None => {
                LOOKUP_MISSES.with_label_values(&["stock"]).inc();
                Err(QueryError::ProductNotFound(id.to_string()))
            }
        })
    }

    /// Categories with counts, sorted by name.
    pub fn list_categories(&self) -> Vec<CategoryCount> {
        timed("categories", || self.catalog.categories())
    }

    /// Products in one category, in load order.
    pub fn category_products(&self, category: &str, limit: Option<usize>) -> QueryResult {
        timed("category_products", || {
            let criteria = SearchCriteria {
                category: Some(category.to_string()),
                ..SearchCriteria::default()
            };
            let matches = self.filter(&criteria);
            self.truncate(matches, limit)
        })
    }

    /// Filtered search re-ranked by the recommendation blend.
    ///
    /// Any requested sort key is ignored; the ranking is the order.
    pub fn recommend(&self, criteria: &SearchCriteria) -> QueryResult {
        timed("recommend", || {
            let matches = self.filter(criteria);

            // The budget is the effective upper price bound, when one was given.
            let budget = match (criteria.min_price, criteria.max_price) {
                (Some(lo), Some(hi)) if lo > hi => Some(lo),
                (_, Some(hi)) => Some(hi),
                _ => None,
            };

            let mut scored: Vec<(f64, &Product)> = matches
                .into_iter()
                .map(|p| (rank_score(p, budget, &self.config.ranking), p))
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));

            let ranked: Vec<&Product> = scored.into_iter().map(|(_, p)| p).collect();
            self.truncate(ranked, criteria.limit)
        })
    }

    /// Stable pseudo-random storefront sample.
    pub fn featured(&self, limit: Option<usize>) -> QueryResult {
        timed("featured", || {
            let n = limit
                .unwrap_or(self.config.featured_count)
                .min(self.catalog.len());
            let products: Vec<ProductSummary> = self.featured_order[..n]
                .iter()
                .map(|&index| ProductSummary::from(&self.catalog.products()[index]))
                .collect();

            QUERY_RESULTS.observe(products.len() as f64);
            QueryResult {
                total_matches: products.len() as u64,
                count: products.len() as u64,
                products,
            }
        })
    }

    fn filter<'a>(&'a self, criteria: &SearchCriteria) -> Vec<&'a Product> {
        let keyword = normalized(criteria.keyword.as_deref());
        let category = normalized(criteria.category.as_deref());
        let brand = normalized(criteria.brand.as_deref());
        let (price_lo, price_hi) = effective_price_range(criteria);

        self.catalog
            .products()
            .iter()
            .filter(|p| {
                if let Some(ref keyword) = keyword {
                    if !keyword_match(p, keyword) {
                        return false;
                    }
                }
                if let Some(ref category) = category {
                    if !field_eq(p.category.as_deref(), category) {
                        return false;
                    }
                }
                if let Some(ref brand) = brand {
                    if !field_eq(p.brand.as_deref(), brand) {
                        return false;
                    }
                }
                if p.price < price_lo || p.price > price_hi {
                    return false;
                }
                if let Some(min_rating) = criteria.min_rating {
                    if !p.rating.is_some_and(|r| r >= min_rating) {
                        return false;
                    }
                }
                if criteria.in_stock_only && !p.in_stock {
                    return false;
                }
                true
            })
            .collect()
    }

    fn truncate(&self, matches: Vec<&Product>, limit: Option<usize>) -> QueryResult {
        let limit = limit.unwrap_or(self.config.default_limit);
        let total_matches = matches.len() as u64;
        let products: Vec<ProductSummary> = matches
            .into_iter()
            .take(limit)
            .map(ProductSummary::from)
            .collect();

        QUERY_RESULTS.observe(products.len() as f64);
        QueryResult {
            count: products.len() as u64,
            total_matches,
            products,
        }
    }
}

fn timed<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    QUERIES_TOTAL.with_label_values(&[operation]).inc();
    let result = f();
    QUERY_DURATION
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());
    result
}

/// Trimmed, lowercased criteria value; empty means no constraint.
fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Substring match over the searchable text fields.
fn keyword_match(product: &Product, keyword: &str) -> bool {
    product.name.to_lowercase().contains(keyword)
        || product.description.to_lowercase().contains(keyword)
        || product
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(keyword))
        || product
            .brand
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(keyword))
}

/// Case-insensitive exact match against an optional field.
/// `wanted` is already lowercased.
fn field_eq(field: Option<&str>, wanted: &str) -> bool {
    field.is_some_and(|v| v.to_lowercase() == wanted)
}

/// Effective inclusive price range; an inverted range is swapped, not rejected.
fn effective_price_range(criteria: &SearchCriteria) -> (f64, f64) {
    let lo = criteria.min_price.unwrap_or(0.0);
    let hi = criteria.max_price.unwrap_or(f64::INFINITY);
    if lo > hi {
        (hi, lo)
    } else {
        (lo, hi)
    }
}

/// Stable sort; equal keys keep catalog load order.
fn sort_products(products: &mut [&Product], key: SortKey, order: SortOrder) {
    let descending = order == SortOrder::Descending;
    match key {
        SortKey::Price => {
            products.sort_by(|a, b| directed(a.price.total_cmp(&b.price), descending))
        }
        SortKey::Name => products.sort_by(|a, b| directed(a.name.cmp(&b.name), descending)),
        // Unrated products go last in either direction.
        SortKey::Rating => products.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(left), Some(right)) => directed(left.total_cmp(&right), descending),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}
