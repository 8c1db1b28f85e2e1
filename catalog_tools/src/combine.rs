//! Runs product and price pages through the combiner and shows the resulting catalog rows.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::*;
use loja_tools::{
    combine_products,
    load_snapshot,
    sample_payloads,
    save_snapshot,
    unwrap_payloads,
    CombineOutcome,
    LojaIntegradaApi,
    LojaIntegradaConfig,
};
use serde_json::Value;

use crate::interactive::{
    formatting::{format_combine_report, format_combined_products},
    spinner,
};

/// Where the product and price pages come from.
pub enum CombineSource {
    Files { products: PathBuf, prices: PathBuf },
    Live { config: LojaIntegradaConfig, limit: u32 },
    SelfTest,
}

/// The combiner only reads arrays of pages. A single page, as saved by `probe` or returned by one request, is wrapped
/// into a list of one.
pub fn as_page_list(payload: Value) -> Value {
    match payload {
        Value::Object(_) => Value::Array(vec![payload]),
        other => other,
    }
}

pub async fn load_payloads(source: &CombineSource) -> Result<(Value, Value)> {
    match source {
        CombineSource::Files { products, prices } => {
            Ok((as_page_list(load_snapshot(products)?), as_page_list(load_snapshot(prices)?)))
        },
        CombineSource::Live { config, limit } => {
            let api = LojaIntegradaApi::new(config.clone())?;
            let pb = spinner("Fetching products and prices...");
            let pages = async {
                let products = api.fetch_products(*limit, 0).await?;
                let prices = api.fetch_prices(*limit, 0).await?;
                Ok::<_, loja_tools::LojaApiError>((as_page_list(products.payload), as_page_list(prices.payload)))
            }
            .await;
            pb.finish_with_message(if pages.is_ok() { "Done!" } else { "Error!" });
            Ok(pages?)
        },
        CombineSource::SelfTest => Ok(sample_payloads()),
    }
}

pub fn run_combiner(products: &Value, prices: &Value, synced_at: DateTime<Utc>) -> CombineOutcome {
    let (products, prices) = unwrap_payloads(products, prices);
    combine_products(&products, &prices, synced_at)
}

/// Differences between the combined sample and what it is known to produce.
pub fn self_test_failures(outcome: &CombineOutcome) -> Vec<String> {
    let mut failures = Vec::new();
    let [record] = outcome.records.as_slice() else {
        failures.push(format!("expected 1 record, got {}", outcome.records.len()));
        return failures;
    };
    let mut check = |field: &str, actual: String, expected: &str| {
        if actual != expected {
            failures.push(format!("{field}: expected {expected}, got {actual}"));
        }
    };
    check("id_produto_loja_integrada", format!("{:?}", record.id_produto_loja_integrada), "Some(365654272)");
    check("nome", record.nome.clone(), "Drone DJI Mavic 3 Enterprise + Kit 3 Baterias");
    check("sku", record.sku.clone(), "F7VMEU95P");
    check("preco_cheio", record.preco_cheio.clone(), "R$ 19.000,00");
    check("preco_promocional", format!("{:?}", record.preco_promocional), "None");
    check("fonte", record.fonte.clone(), "loja_integrada");
    failures
}

pub async fn combine(source: CombineSource, output: Option<&Path>) -> Result<String> {
    let (products, prices) = load_payloads(&source).await?;
    let outcome = run_combiner(&products, &prices, Utc::now());
    let mut report = format_combined_products(&outcome.records);
    report.push('\n');
    report.push_str(&format_combine_report(&outcome.report)?);
    if let Some(path) = output {
        let json = serde_json::to_value(&outcome.records)?;
        save_snapshot(path, &json)?;
        report.push_str(&format!("Combined records saved to {}\n", path.display()));
    }
    if matches!(source, CombineSource::SelfTest) {
        let failures = self_test_failures(&outcome);
        if !failures.is_empty() {
            warn!("Combiner self-test failed with {} difference(s)", failures.len());
            return Err(anyhow!("Self-test failed:\n{}", failures.join("\n")));
        }
        report.push_str("Self-test passed");
    }
    Ok(report)
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn self_test_passes() {
        let report = combine(CombineSource::SelfTest, None).await.unwrap();
        assert!(report.contains("R$ 19.000,00"));
        assert!(report.ends_with("Self-test passed"));
    }

    #[test]
    fn self_test_notices_differences() {
        let (products, _) = sample_payloads();
        let outcome = run_combiner(&products, &json!([]), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let failures = self_test_failures(&outcome);
        assert_eq!(failures, vec!["preco_cheio: expected R$ 19.000,00, got R$ 0,00".to_string()]);
        let outcome = run_combiner(&json!([]), &json!([]), Utc::now());
        assert_eq!(self_test_failures(&outcome), vec!["expected 1 record, got 0".to_string()]);
    }

    #[test]
    fn single_pages_are_wrapped() {
        let page = json!({"meta": {"total_count": 1}, "objects": [{"id": 1}]});
        assert_eq!(as_page_list(page.clone()), json!([page.clone()]));
        assert_eq!(as_page_list(json!([page.clone()])), json!([page.clone()]));
        assert_eq!(as_page_list(json!(null)), json!(null));
        assert!(run_combiner(&page, &json!([]), Utc::now()).records.is_empty());
        assert_eq!(run_combiner(&as_page_list(page), &json!([]), Utc::now()).records.len(), 1);
    }

    #[tokio::test]
    async fn combine_saved_files() {
        let dir = tempfile::tempdir().unwrap();
        let products = dir.path().join("produtos.json");
        let prices = dir.path().join("precos.json");
        let output = dir.path().join("combinados.json");
        save_snapshot(&products, &json!({"meta": {"total_count": 2}, "objects": [{"id": 1, "nome": "A"}, {"id": 2}]}))
            .unwrap();
        save_snapshot(&prices, &json!([{"objects": [{"produto": "/api/v1/produto/2", "cheio": "1500.5"}]}])).unwrap();
        let source = CombineSource::Files { products, prices };
        let report = combine(source, Some(&output)).await.unwrap();
        assert!(report.contains("R$ 1.500,50"));
        assert!(report.contains("Products without a price: 1"));
        let saved = load_snapshot(&output).unwrap();
        assert_eq!(saved.as_array().map(Vec::len), Some(2));
        assert_eq!(saved[1]["preco_cheio"], "R$ 1.500,50");
        assert_eq!(saved[0]["preco_cheio"], "R$ 0,00");
    }
}
