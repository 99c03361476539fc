use polars::prelude::{DataFrame, Series, NamedFrom};
use crate::config::CatalogContext;
use crate::error::AppResult;
use crate::system_catalog::descriptor::{ColType, ColumnDef};
use crate::system_catalog::registry::{self, SystemTable};
use super::role_common::DEFAULT_MEMBERSHIPS;

pub struct PgAuthMembers;

const COLS: &[ColumnDef] = &[
    ColumnDef::new("oid", ColType::Oid, 1),
    ColumnDef::new("roleid", ColType::Oid, 2),
    ColumnDef::new("member", ColType::Oid, 3),
    ColumnDef::new("grantor", ColType::Oid, 4),
    ColumnDef::new("admin_option", ColType::Bool, 5),
    ColumnDef::new("inherit_option", ColType::Bool, 6),
    ColumnDef::new("set_option", ColType::Bool, 7),
];

impl SystemTable for PgAuthMembers {
    fn schema(&self) -> &'static str { "pg_catalog" }
    fn name(&self) -> &'static str { "pg_auth_members" }
    fn columns(&self) -> &'static [ColumnDef] { COLS }
    fn build(&self, ctx: &CatalogContext) -> AppResult<DataFrame> {
        // Bootstrap grants only exist between predefined roles
        let grants: Vec<_> = if ctx.config.include_predefined { DEFAULT_MEMBERSHIPS.to_vec() } else { Vec::new() };
        let oid: Vec<u32> = grants.iter().map(|g| g.oid).collect();
        let roleid: Vec<u32> = grants.iter().map(|g| g.roleid).collect();
        let member: Vec<u32> = grants.iter().map(|g| g.member).collect();
        let grantor: Vec<u32> = grants.iter().map(|g| g.grantor).collect();
        let admin_option: Vec<bool> = grants.iter().map(|g| g.admin_option).collect();
        let inherit_option: Vec<bool> = grants.iter().map(|g| g.inherit_option).collect();
        let set_option: Vec<bool> = grants.iter().map(|g| g.set_option).collect();
        Ok(DataFrame::new(vec![
            Series::new("oid".into(), oid).into(),
            Series::new("roleid".into(), roleid).into(),
            Series::new("member".into(), member).into(),
            Series::new("grantor".into(), grantor).into(),
            Series::new("admin_option".into(), admin_option).into(),
            Series::new("inherit_option".into(), inherit_option).into(),
            Series::new("set_option".into(), set_option).into(),
        ])?)
    }
}

pub fn register() { registry::register(Box::new(PgAuthMembers)); }
