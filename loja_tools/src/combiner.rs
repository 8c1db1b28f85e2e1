//! Joins product records with their price records and flattens the pair into the row layout of the catalog sheet.

use std::collections::{HashMap, HashSet};

use catalog_common::Centavos;
use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Price, PriceAmount, Product};

/// Tag written to every combined record to identify where the data came from.
pub const SOURCE_TAG: &str = "loja_integrada";

/// One row of the catalog sheet: a product merged with its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedProduct {
    pub id_produto_loja_integrada: Option<i64>,
    pub nome: String,
    pub titulo_produto: String,
    pub apelido: String,
    pub sku: String,
    pub descricao_completa: String,
    pub descricao_produto: String,
    pub url_produto: String,
    pub url_video_youtube: String,
    pub gtin: String,
    pub mpn: String,
    pub ncm: String,
    pub id_externo: Value,
    pub ativo: bool,
    pub bloqueado: bool,
    pub removido: bool,
    pub tipo: String,
    pub preco_cheio: String,
    pub preco_promocional: Option<String>,
    pub preco_custo: Option<String>,
    pub sob_consulta: bool,
    pub data_sincronizacao: DateTime<Utc>,
    pub fonte: String,
}

/// Formats a price field as `R$ 1.234,56`. Absent and unreadable values both render as `R$ 0,00`.
///
/// Amounts are held as `i64` centavos, so anything beyond about 92 quadrillion reais (e.g. `"1e20"`) counts as
/// unreadable and also renders as `R$ 0,00`.
pub fn format_brl(amount: &PriceAmount) -> String {
    amount.centavos().unwrap_or_default().to_string()
}

/// Like [`format_brl`], but an absent value stays absent.
fn format_optional_brl(amount: &PriceAmount) -> Option<String> {
    (!amount.is_absent()).then(|| format_brl(amount))
}

fn product_key(product_id: Option<i64>) -> Option<String> {
    product_id.filter(|id| *id != 0).map(|id| id.to_string())
}

/// Returns the first price, in input order, whose back-reference points at `product_id`.
///
/// A missing or zero id never matches. Matching is plain string equality on the last path segment of the
/// back-reference.
pub fn find_price(product_id: Option<i64>, prices: &[Price]) -> Option<&Price> {
    if prices.is_empty() {
        return None;
    }
    let key = product_key(product_id)?;
    prices.iter().find(|p| p.product_reference() == key)
}

/// Lookup table from product id to price with the same results as [`find_price`], built in one pass.
pub struct PriceIndex<'a> {
    by_product: HashMap<&'a str, &'a Price>,
    duplicates: HashSet<&'a str>,
}

impl<'a> PriceIndex<'a> {
    pub fn new(prices: &'a [Price]) -> Self {
        let mut by_product = HashMap::with_capacity(prices.len());
        let mut duplicates = HashSet::new();
        for price in prices {
            let reference = price.product_reference();
            if by_product.contains_key(reference) {
                duplicates.insert(reference);
            } else {
                by_product.insert(reference, price);
            }
        }
        Self { by_product, duplicates }
    }

    pub fn get(&self, product_id: Option<i64>) -> Option<&'a Price> {
        let key = product_key(product_id)?;
        self.by_product.get(key.as_str()).copied()
    }

    /// Whether more than one price points at this product. Only the first one is ever used.
    pub fn has_duplicates(&self, product_id: Option<i64>) -> bool {
        product_key(product_id).is_some_and(|key| self.duplicates.contains(key.as_str()))
    }
}

pub fn combine(product: &Product, price: Option<&Price>, synced_at: DateTime<Utc>) -> CombinedProduct {
    let zero = Centavos::default().to_string();
    CombinedProduct {
        id_produto_loja_integrada: product.id,
        nome: product.nome.clone(),
        titulo_produto: product.nome.clone(),
        apelido: product.apelido.clone(),
        sku: product.sku.clone(),
        descricao_completa: product.descricao_completa.clone(),
        descricao_produto: product.descricao_completa.clone(),
        url_produto: product.url.clone(),
        url_video_youtube: product.url_video_youtube.clone(),
        gtin: product.gtin.clone(),
        mpn: product.mpn.clone(),
        ncm: product.ncm.clone(),
        id_externo: product.id_externo.clone(),
        ativo: product.ativo,
        bloqueado: product.bloqueado,
        removido: product.removido,
        tipo: product.tipo.clone(),
        preco_cheio: price.map(|p| format_brl(&p.cheio)).unwrap_or(zero),
        preco_promocional: price.and_then(|p| format_optional_brl(&p.promocional)),
        preco_custo: price.and_then(|p| format_optional_brl(&p.custo)),
        sob_consulta: price.is_some_and(|p| p.sob_consulta),
        data_sincronizacao: synced_at,
        fonte: SOURCE_TAG.to_string(),
    }
}

/// Data quality figures for one combine run.
///
/// Every product yields exactly one record, but a product with several prices only gets the first, and prices that
/// point at no product in the batch are dropped. Both cases are counted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombineReport {
    pub products: usize,
    pub prices: usize,
    pub matched: usize,
    pub unmatched_products: usize,
    pub unused_prices: usize,
    pub products_with_several_prices: usize,
}

#[derive(Debug, Clone)]
pub struct CombineOutcome {
    pub records: Vec<CombinedProduct>,
    pub report: CombineReport,
}

/// Produces one [`CombinedProduct`] per product, in product order.
pub fn combine_products(products: &[Product], prices: &[Price], synced_at: DateTime<Utc>) -> CombineOutcome {
    let index = PriceIndex::new(prices);
    let mut report = CombineReport { products: products.len(), prices: prices.len(), ..Default::default() };
    let mut records = Vec::with_capacity(products.len());
    for product in products {
        let price = index.get(product.id);
        match price {
            Some(_) => report.matched += 1,
            None => report.unmatched_products += 1,
        }
        if index.has_duplicates(product.id) {
            warn!("Product {:?} has more than one price record. Only the first one is used.", product.id);
            report.products_with_several_prices += 1;
        }
        records.push(combine(product, price, synced_at));
    }
    let product_keys = products.iter().filter_map(|p| product_key(p.id)).collect::<HashSet<String>>();
    report.unused_prices = prices.iter().filter(|p| !product_keys.contains(p.product_reference())).count();
    if report.unused_prices > 0 {
        warn!("{} price record(s) do not belong to any product in this batch", report.unused_prices);
    }
    info!("Combined products generated: {}", records.len());
    CombineOutcome { records, report }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::unwrap_payloads;

    fn synced_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 28, 18, 0, 0).unwrap()
    }

    fn product(id: i64) -> Product {
        Product { id: Some(id), nome: format!("Produto {id}"), ..Default::default() }
    }

    fn price(id: i64, reference: &str, cheio: &str) -> Price {
        Price::from_json(&json!({"id": id, "produto": reference, "cheio": cheio}))
    }

    #[test]
    fn formatar_preco() {
        assert_eq!(format_brl(&PriceAmount::from_json(&json!(null))), "R$ 0,00");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!(""))), "R$ 0,00");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!(0))), "R$ 0,00");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!("abc"))), "R$ 0,00");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!("19000.0000"))), "R$ 19.000,00");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!("1234567.891"))), "R$ 1.234.567,89");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!(89.9))), "R$ 89,90");
        assert_eq!(format_brl(&PriceAmount::from_json(&json!("1e20"))), "R$ 0,00");
        for s in ["_5", "5_", "1__000"] {
            assert_eq!(format_brl(&PriceAmount::from_json(&json!(s))), "R$ 0,00", "{s}");
        }
        assert_eq!(format_brl(&PriceAmount::from_json(&json!("1_000.5"))), "R$ 1.000,50");
    }

    #[test]
    fn find_price_edge_cases() {
        let prices = vec![price(1, "/api/v1/produto/10", "5.00"), price(2, "/api/v1/produto/20/", "6.00")];
        assert_eq!(find_price(Some(10), &prices).and_then(|p| p.id), Some(1));
        assert!(find_price(Some(20), &prices).is_none(), "trailing slash must not match");
        assert!(find_price(None, &prices).is_none());
        assert!(find_price(Some(0), &prices).is_none());
        assert!(find_price(Some(10), &[]).is_none());
    }

    #[test]
    fn first_matching_price_wins() {
        let prices = vec![
            price(1, "/api/v1/produto/99", "1.00"),
            price(2, "/api/v1/produto/10", "2.00"),
            price(3, "/api/v1/produto/10", "3.00"),
        ];
        assert_eq!(find_price(Some(10), &prices).and_then(|p| p.id), Some(2));
        let index = PriceIndex::new(&prices);
        assert_eq!(index.get(Some(10)).and_then(|p| p.id), Some(2));
        assert!(index.has_duplicates(Some(10)));
        assert!(!index.has_duplicates(Some(99)));

        let outcome = combine_products(&[product(10)], &prices, synced_at());
        assert_eq!(outcome.records[0].preco_cheio, "R$ 2,00");
        assert_eq!(outcome.report.products_with_several_prices, 1);
        assert_eq!(outcome.report.unused_prices, 1);
    }

    #[test]
    fn index_agrees_with_linear_scan() {
        let prices = vec![
            price(1, "/api/v1/produto/1", "1"),
            price(2, "2", "2"),
            price(3, "/api/v1/produto/1", "3"),
            price(4, "", "4"),
            price(5, "/x/0", "5"),
        ];
        let index = PriceIndex::new(&prices);
        for id in [None, Some(0), Some(1), Some(2), Some(3), Some(-1)] {
            assert_eq!(index.get(id), find_price(id, &prices), "mismatch for {id:?}");
        }
    }

    #[test]
    fn one_record_per_product_in_order() {
        let products = vec![product(3), product(1), Product::default(), product(2)];
        let prices = vec![price(1, "/api/v1/produto/2", "10.5")];
        let outcome = combine_products(&products, &prices, synced_at());
        let ids = outcome.records.iter().map(|r| r.id_produto_loja_integrada).collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(3), Some(1), None, Some(2)]);
        assert_eq!(outcome.records[3].preco_cheio, "R$ 10,50");
        assert_eq!(outcome.report.matched, 1);
        assert_eq!(outcome.report.unmatched_products, 3);
        assert_eq!(outcome.report.unused_prices, 0);
    }

    #[test]
    fn unmatched_product_gets_default_prices() {
        let outcome = combine_products(&[product(5)], &[price(1, "/api/v1/produto/6", "9.99")], synced_at());
        let record = &outcome.records[0];
        assert_eq!(record.preco_cheio, "R$ 0,00");
        assert_eq!(record.preco_promocional, None);
        assert_eq!(record.preco_custo, None);
        assert!(!record.sob_consulta);
        assert_eq!(record.fonte, "loja_integrada");
        assert_eq!(record.tipo, "produto");
    }

    #[test]
    fn optional_prices_follow_truthiness() {
        let p = Price::from_json(&json!({
            "produto": "/api/v1/produto/5",
            "cheio": "100.00",
            "promocional": "0.00",
            "custo": "abc",
            "sob_consulta": true
        }));
        let record = combine(&product(5), Some(&p), synced_at());
        assert_eq!(record.preco_cheio, "R$ 100,00");
        assert_eq!(record.preco_promocional.as_deref(), Some("R$ 0,00"));
        assert_eq!(record.preco_custo.as_deref(), Some("R$ 0,00"));
        assert!(record.sob_consulta);

        let p = Price::from_json(&json!({"produto": "/api/v1/produto/5", "cheio": null, "promocional": 0}));
        let record = combine(&product(5), Some(&p), synced_at());
        assert_eq!(record.preco_cheio, "R$ 0,00");
        assert_eq!(record.preco_promocional, None);
    }

    #[test]
    fn drone_scenario() {
        let products: Value = serde_json::from_str(include_str!("./fixtures/produtos.json")).unwrap();
        let prices: Value = serde_json::from_str(include_str!("./fixtures/precos.json")).unwrap();
        let (products, prices) = unwrap_payloads(&products, &prices);
        let outcome = combine_products(&products, &prices, synced_at());
        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.id_produto_loja_integrada, Some(365654272));
        assert_eq!(record.nome, "Drone DJI Mavic 3 Enterprise + Kit 3 Baterias");
        assert_eq!(record.titulo_produto, record.nome);
        assert_eq!(record.sku, "F7VMEU95P");
        assert_eq!(record.preco_cheio, "R$ 19.000,00");
        assert_eq!(record.preco_promocional, None);
        assert_eq!(record.preco_custo, None);
        assert!(record.ativo);
        assert!(!record.sob_consulta);
        assert_eq!(record.descricao_produto, "<p>Drone profissional com garantia</p>");

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["data_sincronizacao"], "2024-08-28T18:00:00Z");
        assert_eq!(json["preco_promocional"], Value::Null);
        assert_eq!(json["id_externo"], Value::Null);
        assert_eq!(json["fonte"], "loja_integrada");
    }
}
