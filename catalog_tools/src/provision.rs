//! Makes sure a Baserow database holds a product table laid out for the catalog sync.

use anyhow::{anyhow, bail, Result};
use baserow_tools::{find_product_table, product_table_fields, Application, BaserowApi, BaserowConfig, Table};
use log::*;

use crate::interactive::{
    formatting::{format_databases, format_fields, format_tables, format_workspaces},
    selector::select,
    spinner,
};

#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Skip the workspace prompt
    pub workspace: Option<i64>,
    /// Skip the database prompt
    pub database: Option<i64>,
    /// Name given to the table if one has to be created
    pub table_name: String,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self { workspace: None, database: None, table_name: baserow_tools::PRODUCT_TABLE_NAME.to_string() }
    }
}

/// Workspace applications of other kinds (e.g. application builders) can't hold tables.
fn databases_only(applications: Vec<Application>) -> Vec<Application> {
    applications.into_iter().filter(|a| a.application_type.is_empty() || a.application_type == "database").collect()
}

pub fn format_ids(table: &Table, database_id: i64, workspace_id: i64) -> String {
    format!(
        "Use these ids in the sync workflow:\n  Table ID:     {}\n  Database ID:  {database_id}\n  Workspace ID: \
         {workspace_id}",
        table.id
    )
}

pub async fn test_connection(config: BaserowConfig) -> Result<String> {
    let api = BaserowApi::new(config)?;
    let user = api.test_connection().await?;
    Ok(format!("Connected to {} as {}", api.base_url(), user.username))
}

pub async fn provision(config: BaserowConfig, options: ProvisionOptions) -> Result<String> {
    let api = BaserowApi::new(config)?;
    println!("Testing the connection to {}", api.base_url());
    let user = api.test_connection().await.map_err(|e| anyhow!("Could not connect to Baserow. {e}"))?;
    println!("Connected as {}", user.username);

    let workspaces = api.list_workspaces().await?;
    if workspaces.is_empty() {
        bail!("No workspace found. Create one in Baserow first");
    }
    println!("{}", format_workspaces(&workspaces));
    let workspace = select("workspace", &workspaces, options.workspace)?;

    let databases = databases_only(api.list_databases(workspace.id).await?);
    if databases.is_empty() {
        bail!("No database found in workspace {}. Create one in Baserow first", workspace.name);
    }
    println!("{}", format_databases(&databases));
    let database = select("database", &databases, options.database)?;

    let tables = api.list_tables(database.id).await?;
    println!("{}", format_tables(&tables));
    let table = match find_product_table(&tables) {
        Some(table) => {
            println!("Found an existing product table: {} (ID: {})", table.name, table.id);
            let fields = api.get_table_fields(table.id).await?;
            println!("{}", format_fields(&fields));
            table.clone()
        },
        None => {
            let fields = product_table_fields();
            let pb = spinner(format!("Creating table '{}' with {} fields...", options.table_name, fields.len()));
            match api.create_table(database.id, &options.table_name, &fields).await {
                Ok(table) => {
                    pb.finish_with_message("Done!");
                    table
                },
                Err(e) => {
                    pb.finish_with_message("Error!");
                    return Err(e.into());
                },
            }
        },
    };
    info!("Product table {} is ready in database {}", table.id, database.id);
    Ok(format_ids(&table, database.id, workspace.id))
}
