use catalog_common::{is_truthy, Centavos};
use log::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::helpers::{flag_or_false, optional_id, string_or_empty};

/// A monetary field of a price record.
///
/// The API sends decimals as strings (`"19000.0000"`), or `null` when a price tier is not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PriceAmount {
    /// Missing, `null`, `""`, `0` or `false`.
    #[default]
    Absent,
    Amount(Centavos),
    /// Set, but not readable as a number. The raw JSON text is kept for diagnostics.
    Unparseable(String),
}

impl PriceAmount {
    pub fn from_json(value: &Value) -> Self {
        if !is_truthy(value) {
            return Self::Absent;
        }
        let parsed = match value {
            Value::String(s) => s.parse::<Centavos>(),
            Value::Number(n) => n.to_string().parse::<Centavos>(),
            Value::Bool(_) => Ok(Centavos::from_reais(1)),
            _ => return Self::Unparseable(value.to_string()),
        };
        parsed.map(Self::Amount).unwrap_or_else(|e| {
            debug!("Price value {value} is not a number. {e}");
            Self::Unparseable(value.to_string())
        })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The amount, if there is a readable one.
    pub fn centavos(&self) -> Option<Centavos> {
        match self {
            Self::Amount(c) => Some(*c),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PriceAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(|v| Self::from_json(&v)).unwrap_or_default())
    }
}

/// A price record from `GET /v1/produto_preco`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Price {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<i64>,
    /// Back-reference to the owning product, e.g. `/api/v1/produto/365654272`
    #[serde(default, deserialize_with = "string_or_empty")]
    pub produto: String,
    #[serde(default)]
    pub cheio: PriceAmount,
    #[serde(default)]
    pub promocional: PriceAmount,
    #[serde(default)]
    pub custo: PriceAmount,
    /// The price is only given on request
    #[serde(default, deserialize_with = "flag_or_false")]
    pub sob_consulta: bool,
}

impl Price {
    /// See [`crate::Product::from_json`]. Undecodable entries become a blank price that matches no product.
    pub fn from_json(value: &Value) -> Self {
        Price::deserialize(value).unwrap_or_else(|e| {
            warn!("Could not decode price record, using a blank one instead. {e}");
            Price::default()
        })
    }

    /// The last `/`-separated segment of the back-reference, which should be the owning product's id.
    ///
    /// No normalisation is done: `/api/v1/produto/42/` yields `""`.
    pub fn product_reference(&self) -> &str {
        self.produto.rsplit('/').next().unwrap_or_default()
    }
}
