//! The sample product and price pages used to self-test the combiner without network access.

use serde_json::Value;

const SAMPLE_PRODUCTS: &str = include_str!("./fixtures/produtos.json");
const SAMPLE_PRICES: &str = include_str!("./fixtures/precos.json");

/// One page of products and one page of prices, each wrapped the way workflow tools hand them over.
pub fn sample_payloads() -> (Value, Value) {
    let products = serde_json::from_str(SAMPLE_PRODUCTS).unwrap_or(Value::Null);
    let prices = serde_json::from_str(SAMPLE_PRICES).unwrap_or(Value::Null);
    (products, prices)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn samples_parse() {
        let (products, prices) = sample_payloads();
        assert!(products.is_array());
        assert!(prices.is_array());
    }
}
