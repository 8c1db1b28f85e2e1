use std::fmt::Write;

use anyhow::Result;
use baserow_tools::{Application, Field, Table as BaserowTable, Workspace};
use loja_tools::{
    inspect::{FieldCheck, PayloadShape, ProductSummary},
    CombineReport,
    CombinedProduct,
    PageResponse,
};
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

pub fn format_workspaces(workspaces: &[Workspace]) -> String {
    let mut table = Table::new();
    table.set_titles(row!["#", "Workspace", "ID"]);
    workspaces.iter().enumerate().for_each(|(i, ws)| {
        table.add_row(row![i + 1, ws.name, ws.id]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_databases(databases: &[Application]) -> String {
    let mut table = Table::new();
    table.set_titles(row!["#", "Database", "ID"]);
    databases.iter().enumerate().for_each(|(i, db)| {
        table.add_row(row![i + 1, db.name, db.id]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_tables(tables: &[BaserowTable]) -> String {
    if tables.is_empty() {
        return "No tables found".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["Table", "ID"]);
    tables.iter().for_each(|t| {
        table.add_row(row![t.name, t.id]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_fields(fields: &[Field]) -> String {
    let mut table = Table::new();
    table.set_titles(row!["Field", "Type", "Primary"]);
    fields.iter().for_each(|f| {
        table.add_row(row![f.name, f.field_type, if f.primary { "yes" } else { "" }]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_combined_products(records: &[CombinedProduct]) -> String {
    if records.is_empty() {
        return "No products".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "SKU", "Nome", "Preço cheio", "Promocional", "Custo", "Ativo", "Sob consulta"]);
    records.iter().for_each(|r| {
        table.add_row(row![
            r.id_produto_loja_integrada.map(|id| id.to_string()).unwrap_or_default(),
            r.sku,
            r.nome,
            r.preco_cheio,
            r.preco_promocional.as_deref().unwrap_or("-"),
            r.preco_custo.as_deref().unwrap_or("-"),
            r.ativo,
            r.sob_consulta
        ]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_combine_report(report: &CombineReport) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "Products: {:<6} Prices: {}", report.products, report.prices)?;
    writeln!(f, "Products with a price: {}", report.matched)?;
    writeln!(f, "Products without a price: {}", report.unmatched_products)?;
    if report.products_with_several_prices > 0 {
        writeln!(f, "Products with more than one price (first one used): {}", report.products_with_several_prices)?;
    }
    if report.unused_prices > 0 {
        writeln!(f, "Prices that match no product: {}", report.unused_prices)?;
    }
    Ok(f)
}

pub fn format_page_response(page: &PageResponse) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "Status: {}", page.status)?;
    writeln!(f, "Headers:")?;
    for (name, value) in &page.headers {
        writeln!(f, "  {name}: {value}")?;
    }
    Ok(f)
}

fn format_summary(summary: &ProductSummary, f: &mut dyn Write) -> Result<()> {
    writeln!(f, "First product:")?;
    for (field, value) in &summary.fields {
        writeln!(f, "  {field:<17} {}", value.as_deref().unwrap_or("N/A"))?;
    }
    writeln!(f, "  {:<17} {}", "imagens", summary.image_count)?;
    if let Some(url) = &summary.first_image_url {
        writeln!(f, "  {:<17} {url}", "primeira imagem")?;
    }
    if let Some(preview) = &summary.description_preview {
        writeln!(f, "  descricao ({} chars): {preview}", summary.description_chars)?;
    }
    if summary.missing_required.is_empty() {
        writeln!(f, "All required fields are present")?;
    } else {
        writeln!(f, "Missing required fields: {}", summary.missing_required.join(", "))?;
    }
    Ok(())
}

pub fn format_payload_shape(shape: &PayloadShape) -> Result<String> {
    let mut f = String::new();
    match shape {
        PayloadShape::List { len, first } => {
            writeln!(f, "Response is a list of {len} product(s)")?;
            match first {
                Some(summary) => format_summary(summary, &mut f)?,
                None => writeln!(f, "The list is empty")?,
            }
        },
        PayloadShape::Envelope { meta, len, first } => {
            let total = meta.as_ref().and_then(|m| m.total_count).map(|t| t.to_string());
            writeln!(f, "Response is a paginated page with {len} object(s)")?;
            writeln!(f, "Total available: {}", total.as_deref().unwrap_or("N/A"))?;
            if let Some(summary) = first {
                format_summary(summary, &mut f)?;
            }
        },
        PayloadShape::Other(kind) => writeln!(f, "Unexpected response shape: {kind}")?,
    }
    Ok(f)
}

pub fn format_field_checks(checks: &[FieldCheck]) -> String {
    let mut table = Table::new();
    table.set_titles(row!["", "Field", "Description", "Type", "Detail"]);
    checks.iter().for_each(|c| {
        table.add_row(row![
            if c.is_present() { "✓" } else { "✗" },
            c.field,
            c.description,
            c.type_name.unwrap_or("absent"),
            c.detail.as_deref().unwrap_or_default()
        ]);
    });
    markdown_style(&mut table);
    let present = checks.iter().filter(|c| c.is_present()).count();
    format!("{table}\n{present} of {} expected fields present", checks.len())
}
