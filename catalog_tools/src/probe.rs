//! Fetches one page of products and reports whether it has the shape the catalog workflow expects.

use std::path::Path;

use anyhow::{anyhow, Result};
use loja_tools::{
    inspect::{inspect_payload, validate_fields},
    load_snapshot,
    save_snapshot,
    LojaApiError,
    LojaIntegradaApi,
    LojaIntegradaConfig,
};

use crate::interactive::{
    formatting::{format_field_checks, format_page_response, format_payload_shape},
    spinner,
};

/// Prints what is about to be sent. The API key is masked.
fn print_request(api: &LojaIntegradaApi, limit: u32, offset: u32) {
    println!("GET {}", api.url("/produto"));
    println!("Authorization: {}", api.config().masked_authorization());
    let params = api.product_query(limit, offset);
    let query = params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<String>>().join("&");
    println!("Query: {query}");
    println!("Timeout: {}s", api.config().timeout.as_secs());
}

pub async fn probe_products(config: LojaIntegradaConfig, limit: u32, offset: u32, output: &Path) -> Result<String> {
    let api = LojaIntegradaApi::new(config)?;
    print_request(&api, limit, offset);
    let pb = spinner("Waiting for Loja Integrada...");
    let page = match api.fetch_products(limit, offset).await {
        Ok(page) => {
            pb.finish_with_message("Done!");
            page
        },
        Err(e) => {
            pb.finish_with_message("Error!");
            return Err(anyhow!(diagnostics(&e)));
        },
    };
    let mut report = format_page_response(&page)?;
    report.push_str(&format_payload_shape(&inspect_payload(&page.payload))?);
    save_snapshot(output, &page.payload)?;
    report.push_str(&format!("Response saved to {}", output.display()));
    Ok(report)
}

/// Describes a failed request for the console.
fn diagnostics(err: &LojaApiError) -> String {
    match err {
        LojaApiError::QueryError { status, message } => {
            let hint = if *status == 401 || *status == 403 { "\nCheck the API key and the application id" } else { "" };
            format!("The API answered with status {status}\nResponse body: {message}{hint}")
        },
        LojaApiError::RestRequestError(e) => format!("The request could not be completed: {e}"),
        LojaApiError::JsonError(e) => format!("The response is not valid JSON: {e}"),
        other => other.to_string(),
    }
}

/// Checks the first product of a saved snapshot for the fields the catalog workflow reads.
pub fn validate_snapshot(path: &Path) -> Result<String> {
    let payload = load_snapshot(path)?;
    let checks = validate_fields(&payload)?;
    Ok(format!("Validating {}\n{}", path.display(), format_field_checks(&checks)))
}
