mod api;
mod combiner;
mod config;
mod error;
mod fixtures;
mod helpers;
mod price;
mod product;
mod snapshot;

pub mod data_objects;
pub mod inspect;

pub use api::{LojaIntegradaApi, PageResponse};
pub use combiner::{
    combine,
    combine_products,
    find_price,
    format_brl,
    CombineOutcome,
    CombineReport,
    CombinedProduct,
    PriceIndex,
    SOURCE_TAG,
};
pub use config::{LojaIntegradaConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use data_objects::{flatten_envelopes, unwrap_payloads, Envelope, Meta};
pub use error::LojaApiError;
pub use fixtures::sample_payloads;
pub use helpers::{display_value, json_type_name};
pub use price::{Price, PriceAmount};
pub use product::{Product, DEFAULT_PRODUCT_TYPE};
pub use snapshot::{load_snapshot, save_snapshot, DEFAULT_SNAPSHOT_FILE};
