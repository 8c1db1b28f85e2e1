use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Price, Product};

/// Pagination metadata of a list response. The page links are opaque paths, e.g.
/// `/api/v1/produto?limit=100&offset=100`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Meta {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub total_count: Option<u64>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// One page of a list response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub objects: Vec<Value>,
}

impl Envelope {
    /// Reads a page, looking through the `{"json": {...}}` wrapper that workflow tools put around each item.
    /// Returns `None` if the value is not shaped like an envelope at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        let inner = unwrap_item(value);
        if !inner.is_object() {
            return None;
        }
        Envelope::deserialize(inner)
            .map_err(|e| debug!("Not a list envelope. {e}"))
            .ok()
    }
}

fn unwrap_item(value: &Value) -> &Value {
    match value.get("json") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

/// Concatenates the `objects` of a sequence of pages, in page order.
///
/// Pages without `objects` contribute nothing. A payload that is not an array of pages, including a single bare page,
/// yields no records.
pub fn flatten_envelopes(payload: &Value) -> Vec<Value> {
    let pages = match payload {
        Value::Array(pages) => pages,
        _ => {
            debug!("Payload is not a sequence of pages, so it holds no records");
            return Vec::new();
        },
    };
    pages
        .iter()
        .filter_map(|page| unwrap_item(page).get("objects").and_then(Value::as_array))
        .flatten()
        .cloned()
        .collect()
}

/// Flattens the product and price payloads and decodes their records.
pub fn unwrap_payloads(products: &Value, prices: &Value) -> (Vec<Product>, Vec<Price>) {
    let products = flatten_envelopes(products).iter().map(Product::from_json).collect::<Vec<Product>>();
    let prices = flatten_envelopes(prices).iter().map(Price::from_json).collect::<Vec<Price>>();
    info!("Products found: {}", products.len());
    info!("Prices found: {}", prices.len());
    (products, prices)
}
