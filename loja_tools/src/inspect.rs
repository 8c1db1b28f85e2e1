//! Checks the shape of a `GET /v1/produto` response against the fields the catalog workflow relies on.

use serde_json::Value;

use crate::{
    data_objects::Meta,
    helpers::{display_value, json_type_name},
    Envelope,
    LojaApiError,
};

/// Fields printed for the first product of a probe.
pub const PROBE_FIELDS: [&str; 9] =
    ["id", "nome", "status", "preco", "estoque", "categoria", "url", "data_criacao", "data_atualizacao"];

/// Fields whose absence is reported as a problem.
pub const REQUIRED_FIELDS: [&str; 5] = ["id", "nome", "status", "preco", "estoque"];

/// Fields checked when validating a saved snapshot, with what they hold.
pub const EXPECTED_FIELDS: [(&str, &str); 11] = [
    ("id", "Product ID"),
    ("nome", "Product name"),
    ("descricao", "Product description"),
    ("status", "Product status"),
    ("preco", "Product price"),
    ("estoque", "Quantity in stock"),
    ("categoria", "Product category"),
    ("url", "Product URL"),
    ("data_criacao", "Creation date"),
    ("data_atualizacao", "Last update date"),
    ("imagens", "Array of images"),
];

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// A bare array of products
    List { len: usize, first: Option<ProductSummary> },
    /// A paginated `{meta, objects}` page
    Envelope { meta: Option<Meta>, len: usize, first: Option<ProductSummary> },
    /// Anything else. Holds the JSON type name.
    Other(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    /// Each of [`PROBE_FIELDS`] with its value, or `None` if the product doesn't have it
    pub fields: Vec<(&'static str, Option<String>)>,
    pub image_count: usize,
    pub first_image_url: Option<String>,
    pub description_chars: usize,
    /// The first 100 characters of the description, with `...` appended if it was cut short
    pub description_preview: Option<String>,
    pub missing_required: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: &'static str,
    pub description: &'static str,
    /// JSON type name of the value, if the field is present
    pub type_name: Option<&'static str>,
    /// e.g. the number of images, the description length or the price string
    pub detail: Option<String>,
}

impl FieldCheck {
    pub fn is_present(&self) -> bool {
        self.type_name.is_some()
    }
}

pub fn inspect_payload(payload: &Value) -> PayloadShape {
    match payload {
        Value::Array(items) => PayloadShape::List { len: items.len(), first: items.first().map(summarize_product) },
        Value::Object(map) if map.contains_key("objects") => match Envelope::from_json(payload) {
            Some(envelope) => PayloadShape::Envelope {
                len: envelope.objects.len(),
                first: envelope.objects.first().map(summarize_product),
                meta: envelope.meta,
            },
            None => PayloadShape::Other("object"),
        },
        other => PayloadShape::Other(json_type_name(other)),
    }
}

pub fn summarize_product(product: &Value) -> ProductSummary {
    let fields =
        PROBE_FIELDS.iter().map(|&f| (f, product.get(f).map(display_value))).collect::<Vec<(&str, Option<String>)>>();
    let images = product.get("imagens").and_then(Value::as_array);
    let image_count = images.map(Vec::len).unwrap_or_default();
    let first_image_url =
        images.and_then(|i| i.first()).map(|img| img.get("url").map(display_value).unwrap_or_else(|| "N/A".into()));
    let description = product.get("descricao").and_then(Value::as_str).unwrap_or_default();
    let description_chars = description.chars().count();
    let description_preview = (!description.is_empty()).then(|| {
        if description_chars > PREVIEW_CHARS {
            format!("{}...", description.chars().take(PREVIEW_CHARS).collect::<String>())
        } else {
            description.to_string()
        }
    });
    let missing_required = REQUIRED_FIELDS.iter().copied().filter(|f| product.get(f).is_none()).collect();
    ProductSummary { fields, image_count, first_image_url, description_chars, description_preview, missing_required }
}

/// The first product of a saved payload, whether it is a bare list or a paginated page.
pub fn first_product(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.get("objects").and_then(Value::as_array).and_then(|o| o.first()),
        _ => None,
    }
}

/// Checks the first product of `payload` for each of [`EXPECTED_FIELDS`].
pub fn validate_fields(payload: &Value) -> Result<Vec<FieldCheck>, LojaApiError> {
    let product =
        first_product(payload).ok_or_else(|| LojaApiError::UnexpectedShape("No products to validate".into()))?;
    let checks = EXPECTED_FIELDS
        .iter()
        .map(|&(field, description)| {
            let value = product.get(field);
            let detail = match (field, value) {
                ("imagens", Some(Value::Array(images))) => Some(format!("{} images found", images.len())),
                ("descricao", Some(Value::String(s))) => Some(format!("{} characters", s.chars().count())),
                ("preco", Some(Value::String(s))) => Some(s.clone()),
                _ => None,
            };
            FieldCheck { field, description, type_name: value.map(json_type_name), detail }
        })
        .collect();
    Ok(checks)
}
