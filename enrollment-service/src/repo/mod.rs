pub mod carts;
pub mod classes;
pub mod payments;
pub mod reviews;
pub mod users;

/// Popular-class/instructor listings are a plain order-by-limit, not a
/// maintained ranking structure.
pub const POPULAR_LIMIT: i64 = 6;
