//! Promotions

mod errors;
pub mod models;
pub mod repositories;

pub use errors::DataAccessError;
pub use repositories::{
    InMemoryPromotionRepository, MockPromotionRepository, PgPromotionRepository,
    PromotionRepository,
};
