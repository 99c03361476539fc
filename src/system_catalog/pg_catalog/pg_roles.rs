use polars::prelude::{DataFrame, Series, NamedFrom};
use crate::config::CatalogContext;
use crate::error::AppResult;
use crate::system_catalog::descriptor::{ColType, ColumnDef};
use crate::system_catalog::registry::{self, SystemTable};
use super::role_common::RoleRows;

/// The view never exposes password state, stored or not.
pub const PASSWORD_MASK: &str = "********";

/// `pg_roles` is the publicly readable view over `pg_authid`.
pub struct PgRoles;

const COLS: &[ColumnDef] = &[
    ColumnDef::new("rolname", ColType::Name, 1),
    ColumnDef::new("rolsuper", ColType::Bool, 2),
    ColumnDef::new("rolinherit", ColType::Bool, 3),
    ColumnDef::new("rolcreaterole", ColType::Bool, 4),
    ColumnDef::new("rolcreatedb", ColType::Bool, 5),
    ColumnDef::new("rolcanlogin", ColType::Bool, 6),
    ColumnDef::new("rolreplication", ColType::Bool, 7),
    ColumnDef::new("rolconnlimit", ColType::Int4, 8),
    ColumnDef::new("rolpassword", ColType::Text, 9),
    ColumnDef::new("rolvaliduntil", ColType::TimestampTz, 10).nullable(),
    ColumnDef::new("rolbypassrls", ColType::Bool, 11),
    ColumnDef::new("rolconfig", ColType::Text, 12).nullable(),
    ColumnDef::new("oid", ColType::Oid, 13),
];

impl SystemTable for PgRoles {
    fn schema(&self) -> &'static str { "pg_catalog" }
    fn name(&self) -> &'static str { "pg_roles" }
    fn columns(&self) -> &'static [ColumnDef] { COLS }
    fn build(&self, ctx: &CatalogContext) -> AppResult<DataFrame> {
        let rows = RoleRows::synthesize(&ctx.config);
        let rolpassword: Vec<String> = vec![PASSWORD_MASK.to_string(); rows.len()];
        let rolconfig: Vec<Option<String>> = vec![None; rows.len()];
        Ok(DataFrame::new(vec![
            Series::new("rolname".into(), rows.rolname).into(),
            Series::new("rolsuper".into(), rows.rolsuper).into(),
            Series::new("rolinherit".into(), rows.rolinherit).into(),
            Series::new("rolcreaterole".into(), rows.rolcreaterole).into(),
            Series::new("rolcreatedb".into(), rows.rolcreatedb).into(),
            Series::new("rolcanlogin".into(), rows.rolcanlogin).into(),
            Series::new("rolreplication".into(), rows.rolreplication).into(),
            Series::new("rolconnlimit".into(), rows.rolconnlimit).into(),
            Series::new("rolpassword".into(), rolpassword).into(),
            Series::new("rolvaliduntil".into(), rows.rolvaliduntil).into(),
            Series::new("rolbypassrls".into(), rows.rolbypassrls).into(),
            Series::new("rolconfig".into(), rolconfig).into(),
            Series::new("oid".into(), rows.oid).into(),
        ])?)
    }
}

pub fn register() { registry::register(Box::new(PgRoles)); }
