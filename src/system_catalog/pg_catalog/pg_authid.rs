//! `pg_catalog.pg_authid`: identifiers, attribute numbers and reserved role OIDs
//! of the authentication catalog, plus the synthesized system table.
//!
//! The numeric values are part of the on-disk and wire contract of PostgreSQL
//! catalogs and must not be renumbered.

use polars::prelude::DataFrame;
use crate::config::CatalogContext;
use crate::error::AppResult;
use crate::system_catalog::descriptor::{CatalogDescriptor, ColType, ColumnDef, IndexDef};
use crate::system_catalog::header::HeaderNames;
use crate::system_catalog::oid::{AttrNumber, Oid};
use crate::system_catalog::registry::{self, SystemTable};
use super::role_common::RoleRows;

// ---- Relation, rowtype, toast and index identifiers ----

pub const AUTH_ID_RELATION_ID: Oid = 1260;
pub const AUTH_ID_RELATION_ROWTYPE_ID: Oid = 2842;
pub const PG_AUTHID_TOAST_TABLE: Oid = 4175;
pub const PG_AUTHID_TOAST_INDEX: Oid = 4176;
pub const AUTH_ID_ROLNAME_INDEX_ID: Oid = 2676;
pub const AUTH_ID_OID_INDEX_ID: Oid = 2677;

// ---- Attribute numbers ----

pub const ANUM_PG_AUTHID_OID: AttrNumber = 1;
pub const ANUM_PG_AUTHID_ROLNAME: AttrNumber = 2;
pub const ANUM_PG_AUTHID_ROLSUPER: AttrNumber = 3;
pub const ANUM_PG_AUTHID_ROLINHERIT: AttrNumber = 4;
pub const ANUM_PG_AUTHID_ROLCREATEROLE: AttrNumber = 5;
pub const ANUM_PG_AUTHID_ROLCREATEDB: AttrNumber = 6;
pub const ANUM_PG_AUTHID_ROLCANLOGIN: AttrNumber = 7;
pub const ANUM_PG_AUTHID_ROLREPLICATION: AttrNumber = 8;
pub const ANUM_PG_AUTHID_ROLBYPASSRLS: AttrNumber = 9;
pub const ANUM_PG_AUTHID_ROLCONNLIMIT: AttrNumber = 10;
pub const ANUM_PG_AUTHID_ROLPASSWORD: AttrNumber = 11;
pub const ANUM_PG_AUTHID_ROLVALIDUNTIL: AttrNumber = 12;

pub const NATTS_PG_AUTHID: usize = 12;

// ---- Reserved role identifiers ----

pub const BOOTSTRAP_SUPERUSERID: Oid = 10;
pub const ROLE_PG_DATABASE_OWNER: Oid = 6171;
pub const ROLE_PG_READ_ALL_DATA: Oid = 6181;
pub const ROLE_PG_WRITE_ALL_DATA: Oid = 6182;
pub const ROLE_PG_MONITOR: Oid = 3373;
pub const ROLE_PG_READ_ALL_SETTINGS: Oid = 3374;
pub const ROLE_PG_READ_ALL_STATS: Oid = 3375;
pub const ROLE_PG_STAT_SCAN_TABLES: Oid = 3377;
pub const ROLE_PG_READ_SERVER_FILES: Oid = 4569;
pub const ROLE_PG_WRITE_SERVER_FILES: Oid = 4570;
pub const ROLE_PG_EXECUTE_SERVER_PROGRAM: Oid = 4571;
pub const ROLE_PG_SIGNAL_BACKEND: Oid = 4200;
pub const ROLE_PG_CHECKPOINT: Oid = 4544;
pub const ROLE_PG_USE_RESERVED_CONNECTIONS: Oid = 4550;
pub const ROLE_PG_CREATE_SUBSCRIPTION: Oid = 6304;

pub const PG_AUTHID_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("oid", ColType::Oid, ANUM_PG_AUTHID_OID),
    ColumnDef::new("rolname", ColType::Name, ANUM_PG_AUTHID_ROLNAME),
    ColumnDef::new("rolsuper", ColType::Bool, ANUM_PG_AUTHID_ROLSUPER),
    ColumnDef::new("rolinherit", ColType::Bool, ANUM_PG_AUTHID_ROLINHERIT),
    ColumnDef::new("rolcreaterole", ColType::Bool, ANUM_PG_AUTHID_ROLCREATEROLE),
    ColumnDef::new("rolcreatedb", ColType::Bool, ANUM_PG_AUTHID_ROLCREATEDB),
    ColumnDef::new("rolcanlogin", ColType::Bool, ANUM_PG_AUTHID_ROLCANLOGIN),
    ColumnDef::new("rolreplication", ColType::Bool, ANUM_PG_AUTHID_ROLREPLICATION),
    ColumnDef::new("rolbypassrls", ColType::Bool, ANUM_PG_AUTHID_ROLBYPASSRLS),
    ColumnDef::new("rolconnlimit", ColType::Int4, ANUM_PG_AUTHID_ROLCONNLIMIT),
    ColumnDef::new("rolpassword", ColType::Text, ANUM_PG_AUTHID_ROLPASSWORD).nullable(),
    ColumnDef::new("rolvaliduntil", ColType::TimestampTz, ANUM_PG_AUTHID_ROLVALIDUNTIL).nullable(),
];

const PG_AUTHID_INDEXES: &[IndexDef] = &[
    IndexDef { oid: AUTH_ID_ROLNAME_INDEX_ID, name: "pg_authid_rolname_index", keys: &["rolname"], unique: true },
    IndexDef { oid: AUTH_ID_OID_INDEX_ID, name: "pg_authid_oid_index", keys: &["oid"], unique: true },
];

pub const PG_AUTHID: CatalogDescriptor = CatalogDescriptor {
    schema: "pg_catalog",
    relname: "pg_authid",
    relation_id: AUTH_ID_RELATION_ID,
    rowtype_id: AUTH_ID_RELATION_ROWTYPE_ID,
    toast_table: PG_AUTHID_TOAST_TABLE,
    toast_index: PG_AUTHID_TOAST_INDEX,
    shared: true,
    natts: NATTS_PG_AUTHID,
    indexes: PG_AUTHID_INDEXES,
    columns: PG_AUTHID_COLUMNS,
};

pub const PG_AUTHID_HEADER_NAMES: HeaderNames = HeaderNames {
    relation: "AuthIdRelationId",
    rowtype: "AuthIdRelation_Rowtype_Id",
    toast_table: "PgAuthidToastTable",
    toast_index: "PgAuthidToastIndex",
    indexes: &["AuthIdRolnameIndexId", "AuthIdOidIndexId"],
};

/// Attribute number of a `pg_authid` column, case-insensitive.
pub fn attnum_for(name: &str) -> Option<AttrNumber> {
    PG_AUTHID.column_by_name(name).map(|c| c.attnum)
}

pub fn attname_for(attnum: AttrNumber) -> Option<&'static str> {
    PG_AUTHID.column(attnum).map(|c| c.name)
}

pub struct PgAuthId;

impl SystemTable for PgAuthId {
    fn schema(&self) -> &'static str { PG_AUTHID.schema }
    fn name(&self) -> &'static str { PG_AUTHID.relname }
    fn columns(&self) -> &'static [ColumnDef] { PG_AUTHID_COLUMNS }
    fn build(&self, ctx: &CatalogContext) -> AppResult<DataFrame> {
        let rows = RoleRows::synthesize(&ctx.config);
        rows.to_df()
    }
}

pub fn register() { registry::register(Box::new(PgAuthId)); }
