pub mod boost;
pub mod query;
pub mod types;

pub use boost::{BoostError, BoostStats, BOOST_FEE_USD};
pub use query::{featured, query};
pub use types::{FilterQuery, FilterSpec};
