use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::{flag_or_false, optional_id, string_or_empty};

pub const DEFAULT_PRODUCT_TYPE: &str = "produto";

/// A product record from `GET /v1/produto`. Only the fields that feed the catalog sheet are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub nome: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub apelido: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub sku: String,
    /// Full description. HTML when the request asked for `description_html`.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub descricao_completa: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub descricao: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url_video_youtube: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub gtin: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub mpn: String,
    /// Mercosur tax classification code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub ncm: String,
    /// Passed through untouched: absent means `""`, but an explicit `null` stays `null`.
    #[serde(default = "empty_external_id")]
    pub id_externo: Value,
    #[serde(default, deserialize_with = "flag_or_false")]
    pub ativo: bool,
    #[serde(default, deserialize_with = "flag_or_false")]
    pub bloqueado: bool,
    #[serde(default, deserialize_with = "flag_or_false")]
    pub removido: bool,
    #[serde(default = "default_product_type", deserialize_with = "product_type")]
    pub tipo: String,
}

fn empty_external_id() -> Value {
    Value::String(String::new())
}

fn default_product_type() -> String {
    DEFAULT_PRODUCT_TYPE.to_string()
}

fn product_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: serde::Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => default_product_type(),
        Some(other) => other.to_string(),
    })
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            nome: String::default(),
            apelido: String::default(),
            sku: String::default(),
            descricao_completa: String::default(),
            descricao: String::default(),
            url: String::default(),
            url_video_youtube: String::default(),
            gtin: String::default(),
            mpn: String::default(),
            ncm: String::default(),
            id_externo: empty_external_id(),
            ativo: false,
            bloqueado: false,
            removido: false,
            tipo: default_product_type(),
        }
    }
}

impl Product {
    /// Decodes one entry of an envelope's `objects`. This never fails: an entry that is not even a JSON object still
    /// produces a (blank) product, so every entry of the source page is accounted for downstream.
    pub fn from_json(value: &Value) -> Self {
        Product::deserialize(value).unwrap_or_else(|e| {
            warn!("Could not decode product record, using a blank one instead. {e}");
            Product::default()
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_full_product() {
        let json = include_str!("./fixtures/produtos.json");
        let envelope: Value = serde_json::from_str(json).unwrap();
        let product = Product::from_json(&envelope[0]["json"]["objects"][0]);
        assert_eq!(product.id, Some(365654272));
        assert_eq!(product.nome, "Drone DJI Mavic 3 Enterprise + Kit 3 Baterias");
        assert_eq!(product.sku, "F7VMEU95P");
        assert_eq!(product.tipo, "normal");
        assert_eq!(product.id_externo, Value::Null);
        assert!(product.ativo);
        assert!(!product.bloqueado);
        assert_eq!(product.url, "https://loja.futuriste.com.br/drone-dji-mavic-3-enterprise-kit-3-baterias");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let product = Product::from_json(&json!({"id": 7}));
        assert_eq!(product.id, Some(7));
        assert_eq!(product.nome, "");
        assert_eq!(product.tipo, "produto");
        assert_eq!(product.id_externo, json!(""));
        assert!(!product.ativo && !product.bloqueado && !product.removido);

        let product = Product::from_json(&json!({"id": 8, "tipo": null, "gtin": null}));
        assert_eq!(product.tipo, "produto");
        assert_eq!(product.gtin, "");
    }

    #[test]
    fn garbage_still_yields_a_product() {
        assert_eq!(Product::from_json(&json!("not a product")), Product::default());
        assert_eq!(Product::from_json(&json!(42)).id, None);
    }
}
