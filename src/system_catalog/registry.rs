use polars::prelude::{Column, DataFrame, DataType, Series, NamedFrom};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use tracing::debug;

use crate::config::CatalogContext;
use crate::error::AppResult;
pub use super::descriptor::{ColType, ColumnDef};

pub trait SystemTable: Send + Sync {
    fn schema(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn columns(&self) -> &'static [ColumnDef];
    fn build(&self, _ctx: &CatalogContext) -> AppResult<DataFrame> {
        // Default build yields the declared columns with no rows
        build_empty(self.columns())
    }
}

pub fn build_empty(cols: &[ColumnDef]) -> AppResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(cols.len());
    for c in cols {
        let s = match c.coltype {
            ColType::Oid => Series::new(c.name.into(), Vec::<u32>::new()),
            ColType::Int4 => Series::new(c.name.into(), Vec::<i32>::new()),
            ColType::Bool => Series::new(c.name.into(), Vec::<bool>::new()),
            ColType::Name | ColType::Text | ColType::TimestampTz => Series::new(c.name.into(), Vec::<Option<String>>::new()),
        };
        columns.push(s.into());
    }
    Ok(DataFrame::new(columns)?)
}

static REGISTRY: OnceCell<Mutex<Vec<Arc<dyn SystemTable>>>> = OnceCell::new();
static DEFAULTS: Once = Once::new();

fn registry() -> &'static Mutex<Vec<Arc<dyn SystemTable>>> {
    REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
}

/// Register a table. A table already registered under the same schema and name
/// is replaced so repeated registration stays idempotent.
pub fn register(table: Box<dyn SystemTable>) {
    let mut reg = registry().lock();
    let (schema, name) = (table.schema(), table.name());
    reg.retain(|t| !(t.schema() == schema && t.name() == name));
    debug!(target: "authid::registry", "registering system table {}.{}", schema, name);
    reg.push(Arc::from(table));
}

pub fn ensure_registered() {
    DEFAULTS.call_once(super::pg_catalog::register_defaults);
}

pub fn all() -> Vec<Arc<dyn SystemTable>> {
    ensure_registered();
    let reg = registry().lock();
    reg.iter().cloned().collect()
}

pub fn find(schema: &str, name: &str) -> Option<Arc<dyn SystemTable>> {
    ensure_registered();
    let reg = registry().lock();
    reg.iter()
        .find(|t| t.schema().eq_ignore_ascii_case(schema) && t.name().eq_ignore_ascii_case(name))
        .map(Arc::clone)
}

/// Build a schema map (column name -> DataType) from a system table's column defs.
pub fn schema_map_for(table: &dyn SystemTable) -> HashMap<String, DataType> {
    table.columns().iter().map(|c| (c.name.to_string(), c.coltype.dtype())).collect()
}

/// Resolve an identifier such as `pg_authid`, `pg_catalog.pg_authid`,
/// `"pg_catalog"/pg_roles` or `pg_auth_members;` to a registered system table.
pub fn lookup_from_str(input: &str) -> Option<Arc<dyn SystemTable>> {
    ensure_registered();
    // Normalize: trim, strip alias after whitespace, strip quotes and semicolon
    let mut base = input.trim().to_string();
    if let Some(idx) = base.find(|c: char| c.is_whitespace()) { base.truncate(idx); }
    if base.ends_with(';') { base.pop(); }
    let ident = base.replace(['"', '\''], "").replace('\\', "/").to_lowercase();
    let dotted = ident.replace('/', ".");
    let parts: Vec<&str> = dotted.split('.').filter(|p| !p.is_empty()).collect();
    let last1 = parts.last().copied().unwrap_or("");
    // Prefer explicit schema.table
    if parts.len() >= 2 {
        if let Some(t) = find(parts[parts.len() - 2], last1) { return Some(t); }
    }
    let found = find("pg_catalog", last1);
    if found.is_none() {
        debug!(target: "authid::registry", "no system table matches '{}'", input);
    }
    found
}
