pub mod catalog;
pub mod categories;
pub mod handlers;
pub mod middleware;
pub mod products;
pub mod routes;
pub mod tools;

pub use routes::create_router;
