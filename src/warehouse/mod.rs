mod models;
mod schema;
mod store;

pub use models::*;
pub use schema::WAREHOUSE_VERSIONED_SCHEMAS;
pub use store::{SongLookup, SqliteWarehouseStore, WarehouseStore};
