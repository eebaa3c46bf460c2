//! Tool-call boundary for the external agent layer.
//!
//! The language model decides *which* tool to call; this module owns *what*
//! the calls can be. Requests arrive as a tagged union, get validated by
//! decoding, and are routed through one fixed match. There is no name-based
//! lookup and no runtime-inferred call shape.

mod types;

pub use types::*;

use crate::query::{QueryEngine, QueryError, QueryResult, SearchCriteria};

/// Route one decoded request to its engine operation.
///
/// Total over `ToolRequest`: every request yields a response, including the
/// not-found cases.
pub fn dispatch(engine: &QueryEngine, request: ToolRequest) -> ToolResponse {
    match request {
        ToolRequest::SearchProducts { criteria } => products_response(engine.search(&criteria)),

        ToolRequest::GetProductDetails { product_id } => {
            match engine.product_details(&product_id) {
                Ok(product) => ToolResponse::Product { product },
                Err(QueryError::ProductNotFound(id)) => not_found(id),
            }
        }

        ToolRequest::CheckStock { product_id } => match engine.check_stock(&product_id) {
            Ok(status) => ToolResponse::Stock {
                product_id: status.product_id,
                name: status.name,
                in_stock: status.in_stock,
            },
            Err(QueryError::ProductNotFound(id)) => not_found(id),
        },

        ToolRequest::ListCategories => {
            let categories = engine.list_categories();
            let total = categories.len() as u64;
            ToolResponse::Categories { categories, total }
        }

        ToolRequest::GetCategoryProducts { category, limit } => {
            products_response(engine.category_products(&category, limit))
        }

        ToolRequest::RecommendProducts {
            keyword,
            category,
            budget,
            min_rating,
            limit,
        } => {
            let criteria = SearchCriteria {
                keyword,
                category,
                max_price: budget,
                min_rating,
                limit,
                ..SearchCriteria::default()
            };
            products_response(engine.recommend(&criteria))
        }
    }
}

/// The closed tool set, for advertisement to the agent layer.
pub fn descriptors() -> &'static [ToolDescriptor] {
    DESCRIPTORS
}

static DESCRIPTORS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "search_products",
        description: "Search the catalog with optional keyword, category, brand, \
                      price range, minimum rating, stock, sort, and limit filters",
        parameters: &[
            "keyword",
            "category",
            "brand",
            "min_price",
            "max_price",
            "min_rating",
            "in_stock_only",
            "sort_by",
            "order",
            "limit",
        ],
    },
    ToolDescriptor {
        name: "get_product_details",
        description: "Fetch the full record for one product by id",
        parameters: &["product_id"],
    },
    ToolDescriptor {
        name: "check_stock",
        description: "Report whether one product is currently in stock",
        parameters: &["product_id"],
    },
    ToolDescriptor {
        name: "list_categories",
        description: "List every category with its product count",
        parameters: &[],
    },
    ToolDescriptor {
        name: "get_category_products",
        description: "List products within one category",
        parameters: &["category", "limit"],
    },
    ToolDescriptor {
        name: "recommend_products",
        description: "Suggest highly rated products, preferring cheaper ones \
                      when a budget is given",
        parameters: &["keyword", "category", "budget", "min_rating", "limit"],
    },
];

fn products_response(result: QueryResult) -> ToolResponse {
    ToolResponse::Products {
        products: result.products,
        total_matches: result.total_matches,
        count: result.count,
    }
}

fn not_found(id: String) -> ToolResponse {
    ToolResponse::NotFound {
        message: format!("No product with id '{id}'"),
        product_id: id,
    }
}
