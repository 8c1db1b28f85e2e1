//! The layout of the product table that catalog syncs write into.

use crate::{FieldDefinition, FieldType, Table};

pub const PRODUCT_TABLE_NAME: &str = "Produtos Loja Integrada";

/// Fields of the product table, in column order. One per field of a combined product record.
pub fn product_table_fields() -> Vec<FieldDefinition> {
    use FieldType::*;
    let mut fields = vec![FieldDefinition::integer("ID Produto Loja Integrada")];
    fields.extend(
        [
            ("Nome", Text),
            ("Título Produto", Text),
            ("Apelido", Text),
            ("SKU", Text),
            ("Descrição Completa", LongText),
            ("Descrição Produto", LongText),
            ("URL Produto", Url),
            ("URL Video YouTube", Url),
            ("GTIN", Text),
            ("MPN", Text),
            ("NCM", Text),
            ("ID Externo", Text),
            ("Ativo", Boolean),
            ("Bloqueado", Boolean),
            ("Removido", Boolean),
            ("Tipo", Text),
            ("Preço Cheio", Text),
            ("Preço Promocional", Text),
            ("Preço Custo", Text),
            ("Sob Consulta", Boolean),
            ("Data Sincronização", Date),
            ("Fonte", Text),
        ]
        .into_iter()
        .map(|(name, field_type)| FieldDefinition::new(name, field_type)),
    );
    fields
}

/// The first table whose name mentions "produto", ignoring case.
pub fn find_product_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|t| t.name.to_lowercase().contains("produto"))
}
