pub mod cart;
pub mod catalog_search;
pub mod client;
pub mod errors;
mod graphql;
