mod models;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use schema::{TABLE_NAMES, WAREHOUSE_SCHEMA};
pub use store::{SqliteWarehouse, DURATION_TOLERANCE_SECS};
pub use trait_def::WarehouseStore;
