use std::collections::HashSet;

use polars::prelude::{DataFrame, Series, NamedFrom};
use serde::Serialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};
use crate::system_catalog::oid::Oid;
use super::pg_authid::*;

/// A role whose OID is fixed by the catalog rather than assigned at CREATE ROLE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WellKnownRole {
    pub oid: Oid,
    /// Macro name in the generated catalog header.
    pub symbol: &'static str,
    /// Catalog name. The bootstrap superuser's display name comes from config instead.
    pub name: &'static str,
    pub description: &'static str,
}

impl WellKnownRole {
    pub fn is_bootstrap(&self) -> bool { self.oid == BOOTSTRAP_SUPERUSERID }
}

pub const WELL_KNOWN_ROLES: &[WellKnownRole] = &[
    WellKnownRole { oid: BOOTSTRAP_SUPERUSERID, symbol: "BOOTSTRAP_SUPERUSERID", name: "POSTGRES", description: "bootstrap superuser created by initdb" },
    WellKnownRole { oid: ROLE_PG_DATABASE_OWNER, symbol: "ROLE_PG_DATABASE_OWNER", name: "pg_database_owner", description: "implicitly contains the owner of the current database" },
    WellKnownRole { oid: ROLE_PG_READ_ALL_DATA, symbol: "ROLE_PG_READ_ALL_DATA", name: "pg_read_all_data", description: "read all tables, views and sequences" },
    WellKnownRole { oid: ROLE_PG_WRITE_ALL_DATA, symbol: "ROLE_PG_WRITE_ALL_DATA", name: "pg_write_all_data", description: "write all tables, views and sequences" },
    WellKnownRole { oid: ROLE_PG_MONITOR, symbol: "ROLE_PG_MONITOR", name: "pg_monitor", description: "read and execute monitoring views and functions" },
    WellKnownRole { oid: ROLE_PG_READ_ALL_SETTINGS, symbol: "ROLE_PG_READ_ALL_SETTINGS", name: "pg_read_all_settings", description: "read all configuration variables" },
    WellKnownRole { oid: ROLE_PG_READ_ALL_STATS, symbol: "ROLE_PG_READ_ALL_STATS", name: "pg_read_all_stats", description: "read all pg_stat_* views" },
    WellKnownRole { oid: ROLE_PG_STAT_SCAN_TABLES, symbol: "ROLE_PG_STAT_SCAN_TABLES", name: "pg_stat_scan_tables", description: "run monitoring functions that take ACCESS SHARE locks" },
    WellKnownRole { oid: ROLE_PG_READ_SERVER_FILES, symbol: "ROLE_PG_READ_SERVER_FILES", name: "pg_read_server_files", description: "read files on the server filesystem" },
    WellKnownRole { oid: ROLE_PG_WRITE_SERVER_FILES, symbol: "ROLE_PG_WRITE_SERVER_FILES", name: "pg_write_server_files", description: "write files on the server filesystem" },
    WellKnownRole { oid: ROLE_PG_EXECUTE_SERVER_PROGRAM, symbol: "ROLE_PG_EXECUTE_SERVER_PROGRAM", name: "pg_execute_server_program", description: "execute programs on the server" },
    WellKnownRole { oid: ROLE_PG_SIGNAL_BACKEND, symbol: "ROLE_PG_SIGNAL_BACKEND", name: "pg_signal_backend", description: "cancel queries or terminate other sessions" },
    WellKnownRole { oid: ROLE_PG_CHECKPOINT, symbol: "ROLE_PG_CHECKPOINT", name: "pg_checkpoint", description: "run the CHECKPOINT command" },
    WellKnownRole { oid: ROLE_PG_USE_RESERVED_CONNECTIONS, symbol: "ROLE_PG_USE_RESERVED_CONNECTIONS", name: "pg_use_reserved_connections", description: "use connection slots reserved by reserved_connections" },
    WellKnownRole { oid: ROLE_PG_CREATE_SUBSCRIPTION, symbol: "ROLE_PG_CREATE_SUBSCRIPTION", name: "pg_create_subscription", description: "create subscriptions given CREATE on the database" },
];

pub fn role_by_oid(oid: Oid) -> Option<&'static WellKnownRole> {
    WELL_KNOWN_ROLES.iter().find(|r| r.oid == oid)
}

/// Find a predefined role by name. Role names are case-sensitive in the catalog.
pub fn role_by_name(name: &str) -> AppResult<&'static WellKnownRole> {
    WELL_KNOWN_ROLES
        .iter()
        .find(|r| !r.is_bootstrap() && r.name == name)
        .ok_or_else(|| AppError::not_found("unknown_role".to_string(), format!("role \"{}\" does not exist", name)))
}

/// True for the predefined `pg_*` roles; the bootstrap superuser is not one.
pub fn is_predefined_role(oid: Oid) -> bool {
    role_by_oid(oid).map(|r| !r.is_bootstrap()).unwrap_or(false)
}

/// The `pg_` prefix is reserved for system roles.
pub fn is_reserved_role_name(name: &str) -> bool {
    name.starts_with("pg_")
}

/// Check the well-known role table: OIDs and names pairwise distinct, exactly one
/// bootstrap superuser, every other role reserved-named.
pub fn validate_registry() -> AppResult<()> {
    let mut oids: HashSet<Oid> = HashSet::new();
    let mut names: HashSet<&str> = HashSet::new();
    for r in WELL_KNOWN_ROLES {
        if !oids.insert(r.oid) {
            return Err(AppError::conflict("duplicate_role_oid".to_string(), format!("role OID {} assigned twice", r.oid)));
        }
        if !names.insert(r.name) {
            return Err(AppError::conflict("duplicate_role_name".to_string(), format!("role name \"{}\" assigned twice", r.name)));
        }
        if !r.is_bootstrap() && !is_reserved_role_name(r.name) {
            return Err(AppError::internal("unreserved_role_name".to_string(), format!("predefined role \"{}\" lacks the pg_ prefix", r.name)));
        }
    }
    let bootstraps = WELL_KNOWN_ROLES.iter().filter(|r| r.is_bootstrap()).count();
    if bootstraps != 1 {
        return Err(AppError::internal("bootstrap_count".to_string(), format!("expected one bootstrap superuser, found {}", bootstraps)));
    }
    Ok(())
}

/// Well-known roles as a JSON array, with the bootstrap superuser under its
/// configured display name.
pub fn roles_json(cfg: &CatalogConfig) -> AppResult<String> {
    let mut listing = serde_json::to_value(WELL_KNOWN_ROLES)?;
    if let Some(items) = listing.as_array_mut() {
        for item in items.iter_mut() {
            if item["oid"] == serde_json::json!(BOOTSTRAP_SUPERUSERID) {
                item["name"] = serde_json::Value::String(cfg.bootstrap_superuser.clone());
            }
        }
    }
    Ok(serde_json::to_string_pretty(&listing)?)
}

/// Default grant made at bootstrap: `member` belongs to `roleid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleMembership {
    pub oid: Oid,
    pub roleid: Oid,
    pub member: Oid,
    pub grantor: Oid,
    pub admin_option: bool,
    pub inherit_option: bool,
    pub set_option: bool,
}

pub const DEFAULT_MEMBERSHIPS: &[RoleMembership] = &[
    RoleMembership { oid: 6300, roleid: ROLE_PG_READ_ALL_SETTINGS, member: ROLE_PG_MONITOR, grantor: BOOTSTRAP_SUPERUSERID, admin_option: false, inherit_option: true, set_option: true },
    RoleMembership { oid: 6301, roleid: ROLE_PG_READ_ALL_STATS, member: ROLE_PG_MONITOR, grantor: BOOTSTRAP_SUPERUSERID, admin_option: false, inherit_option: true, set_option: true },
    RoleMembership { oid: 6302, roleid: ROLE_PG_STAT_SCAN_TABLES, member: ROLE_PG_MONITOR, grantor: BOOTSTRAP_SUPERUSERID, admin_option: false, inherit_option: true, set_option: true },
];

/// Roles `member` belongs to through the bootstrap grants.
pub fn memberships_of(member: Oid) -> Vec<&'static WellKnownRole> {
    DEFAULT_MEMBERSHIPS
        .iter()
        .filter(|m| m.member == member)
        .filter_map(|m| role_by_oid(m.roleid))
        .collect()
}

// Shared builder for role rows used by pg_roles and pg_authid
#[derive(Debug, Default)]
pub struct RoleRows {
    pub oid: Vec<u32>,
    pub rolname: Vec<String>,
    pub rolsuper: Vec<bool>,
    pub rolinherit: Vec<bool>,
    pub rolcreaterole: Vec<bool>,
    pub rolcreatedb: Vec<bool>,
    pub rolcanlogin: Vec<bool>,
    pub rolreplication: Vec<bool>,
    pub rolbypassrls: Vec<bool>,
    pub rolconnlimit: Vec<i32>,
    pub rolpassword: Vec<Option<String>>,
    pub rolvaliduntil: Vec<Option<String>>,
}

impl RoleRows {
    /// One row per well-known role. The bootstrap superuser holds every capability;
    /// predefined roles only inherit and cannot log in.
    pub fn synthesize(cfg: &CatalogConfig) -> RoleRows {
        let mut rows = RoleRows::default();
        for r in WELL_KNOWN_ROLES {
            let boot = r.is_bootstrap();
            if !boot && !cfg.include_predefined { continue; }
            rows.oid.push(r.oid);
            rows.rolname.push(if boot { cfg.bootstrap_superuser.clone() } else { r.name.to_string() });
            rows.rolsuper.push(boot);
            rows.rolinherit.push(true);
            rows.rolcreaterole.push(boot);
            rows.rolcreatedb.push(boot);
            rows.rolcanlogin.push(boot);
            rows.rolreplication.push(boot);
            rows.rolbypassrls.push(boot);
            rows.rolconnlimit.push(-1);
            rows.rolpassword.push(None);
            rows.rolvaliduntil.push(None);
        }
        debug!(target: "authid::catalog", "synthesized {} role rows", rows.len());
        rows
    }

    pub fn len(&self) -> usize { self.oid.len() }

    pub fn is_empty(&self) -> bool { self.oid.is_empty() }

    /// Frame in `pg_authid` attribute order.
    pub fn to_df(&self) -> AppResult<DataFrame> {
        Ok(DataFrame::new(vec![
            Series::new("oid".into(), self.oid.clone()).into(),
            Series::new("rolname".into(), self.rolname.clone()).into(),
            Series::new("rolsuper".into(), self.rolsuper.clone()).into(),
            Series::new("rolinherit".into(), self.rolinherit.clone()).into(),
            Series::new("rolcreaterole".into(), self.rolcreaterole.clone()).into(),
            Series::new("rolcreatedb".into(), self.rolcreatedb.clone()).into(),
            Series::new("rolcanlogin".into(), self.rolcanlogin.clone()).into(),
            Series::new("rolreplication".into(), self.rolreplication.clone()).into(),
            Series::new("rolbypassrls".into(), self.rolbypassrls.clone()).into(),
            Series::new("rolconnlimit".into(), self.rolconnlimit.clone()).into(),
            Series::new("rolpassword".into(), self.rolpassword.clone()).into(),
            Series::new("rolvaliduntil".into(), self.rolvaliduntil.clone()).into(),
        ])?)
    }
}
