mod api;
mod config;
mod error;
mod schema;

pub mod data_objects;

pub use api::BaserowApi;
pub use config::BaserowConfig;
pub use data_objects::{Application, Field, FieldDefinition, FieldType, NumberType, Table, User, Workspace};
pub use error::BaserowApiError;
pub use schema::{find_product_table, product_table_fields, PRODUCT_TABLE_NAME};
