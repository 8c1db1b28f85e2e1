use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
}

/// An application inside a workspace. Databases are the only kind this crate works with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Application {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub application_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Table {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub database_id: Option<i64>,
}

/// A field as reported by `GET /api/database/fields/table/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Field {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    LongText,
    Number,
    Boolean,
    Url,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NumberType {
    Integer,
    Decimal,
}

/// A field to create along with a new table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_type: Option<NumberType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_decimal_places: Option<u8>,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self { name: name.to_string(), field_type, number_type: None, number_decimal_places: None }
    }

    pub fn integer(name: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Number,
            number_type: Some(NumberType::Integer),
            number_decimal_places: Some(0),
        }
    }
}

/// Body of `POST /api/database/tables/database/{id}/`.
#[derive(Debug, Serialize)]
pub struct NewTable<'a> {
    pub name: &'a str,
    pub data: &'a [FieldDefinition],
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_definitions_serialize_with_type_tags() {
        let json = serde_json::to_value(FieldDefinition::integer("ID Produto Loja Integrada")).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "ID Produto Loja Integrada",
                "type": "number",
                "number_type": "INTEGER",
                "number_decimal_places": 0
            })
        );
        let json = serde_json::to_value(FieldDefinition::new("Descrição Completa", FieldType::LongText)).unwrap();
        assert_eq!(json, json!({"name": "Descrição Completa", "type": "long_text"}));
    }

    #[test]
    fn new_table_body() {
        let fields = [FieldDefinition::new("Nome", FieldType::Text)];
        let body = serde_json::to_value(NewTable { name: "Produtos", data: &fields }).unwrap();
        assert_eq!(body, json!({"name": "Produtos", "data": [{"name": "Nome", "type": "text"}]}));
    }

    #[test]
    fn decode_listings() {
        let tables: Vec<Table> =
            serde_json::from_value(json!([{"id": 7, "name": "Produtos", "order": 1, "database_id": 3}])).unwrap();
        assert_eq!(tables[0].database_id, Some(3));
        let apps: Vec<Application> =
            serde_json::from_value(json!([{"id": 3, "name": "Loja", "type": "database", "tables": []}])).unwrap();
        assert_eq!(apps[0].application_type, "database");
        let fields: Vec<Field> =
            serde_json::from_value(json!([{"id": 1, "name": "Nome", "type": "text", "primary": true}])).unwrap();
        assert!(fields[0].primary);
        let user: User = serde_json::from_value(json!({"username": "ana@example.com"})).unwrap();
        assert_eq!(user.username, "ana@example.com");
    }
}
