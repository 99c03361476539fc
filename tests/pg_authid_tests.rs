//! pg_authid catalog integration tests: generated header parity, constant values
//! and the synthesized pg_catalog tables as a postgres client would see them.

use std::collections::HashSet;

use authid::config::{CatalogConfig, CatalogContext};
use authid::pg_authid::*;
use authid::roles::{role_by_name, WELL_KNOWN_ROLES};
use authid::system_catalog::header::{parse_defines, render_pg_authid_header};
use authid::system_catalog::registry;
use authid::Oid;

const GENERATED_HEADER: &str = include_str!("fixtures/pg_authid_d.h");

fn ctx(superuser: &str) -> CatalogContext {
    CatalogContext::new(CatalogConfig { bootstrap_superuser: superuser.to_string(), include_predefined: true })
}

#[test]
fn rendered_header_matches_generated_file() {
    let rendered = render_pg_authid_header().unwrap();
    assert_eq!(rendered, GENERATED_HEADER);
}

#[test]
fn generated_bindings_match_constants() {
    let defs = parse_defines(GENERATED_HEADER).unwrap();
    let expected: Vec<(&str, i64)> = vec![
        ("AuthIdRelationId", AUTH_ID_RELATION_ID as i64),
        ("AuthIdRelation_Rowtype_Id", AUTH_ID_RELATION_ROWTYPE_ID as i64),
        ("PgAuthidToastTable", PG_AUTHID_TOAST_TABLE as i64),
        ("PgAuthidToastIndex", PG_AUTHID_TOAST_INDEX as i64),
        ("AuthIdRolnameIndexId", AUTH_ID_ROLNAME_INDEX_ID as i64),
        ("AuthIdOidIndexId", AUTH_ID_OID_INDEX_ID as i64),
        ("Anum_pg_authid_oid", ANUM_PG_AUTHID_OID as i64),
        ("Anum_pg_authid_rolname", ANUM_PG_AUTHID_ROLNAME as i64),
        ("Anum_pg_authid_rolsuper", ANUM_PG_AUTHID_ROLSUPER as i64),
        ("Anum_pg_authid_rolinherit", ANUM_PG_AUTHID_ROLINHERIT as i64),
        ("Anum_pg_authid_rolcreaterole", ANUM_PG_AUTHID_ROLCREATEROLE as i64),
        ("Anum_pg_authid_rolcreatedb", ANUM_PG_AUTHID_ROLCREATEDB as i64),
        ("Anum_pg_authid_rolcanlogin", ANUM_PG_AUTHID_ROLCANLOGIN as i64),
        ("Anum_pg_authid_rolreplication", ANUM_PG_AUTHID_ROLREPLICATION as i64),
        ("Anum_pg_authid_rolbypassrls", ANUM_PG_AUTHID_ROLBYPASSRLS as i64),
        ("Anum_pg_authid_rolconnlimit", ANUM_PG_AUTHID_ROLCONNLIMIT as i64),
        ("Anum_pg_authid_rolpassword", ANUM_PG_AUTHID_ROLPASSWORD as i64),
        ("Anum_pg_authid_rolvaliduntil", ANUM_PG_AUTHID_ROLVALIDUNTIL as i64),
        ("Natts_pg_authid", NATTS_PG_AUTHID as i64),
        ("BOOTSTRAP_SUPERUSERID", BOOTSTRAP_SUPERUSERID as i64),
        ("ROLE_PG_DATABASE_OWNER", ROLE_PG_DATABASE_OWNER as i64),
        ("ROLE_PG_READ_ALL_DATA", ROLE_PG_READ_ALL_DATA as i64),
        ("ROLE_PG_WRITE_ALL_DATA", ROLE_PG_WRITE_ALL_DATA as i64),
        ("ROLE_PG_MONITOR", ROLE_PG_MONITOR as i64),
        ("ROLE_PG_READ_ALL_SETTINGS", ROLE_PG_READ_ALL_SETTINGS as i64),
        ("ROLE_PG_READ_ALL_STATS", ROLE_PG_READ_ALL_STATS as i64),
        ("ROLE_PG_STAT_SCAN_TABLES", ROLE_PG_STAT_SCAN_TABLES as i64),
        ("ROLE_PG_READ_SERVER_FILES", ROLE_PG_READ_SERVER_FILES as i64),
        ("ROLE_PG_WRITE_SERVER_FILES", ROLE_PG_WRITE_SERVER_FILES as i64),
        ("ROLE_PG_EXECUTE_SERVER_PROGRAM", ROLE_PG_EXECUTE_SERVER_PROGRAM as i64),
        ("ROLE_PG_SIGNAL_BACKEND", ROLE_PG_SIGNAL_BACKEND as i64),
        ("ROLE_PG_CHECKPOINT", ROLE_PG_CHECKPOINT as i64),
        ("ROLE_PG_USE_RESERVED_CONNECTIONS", ROLE_PG_USE_RESERVED_CONNECTIONS as i64),
        ("ROLE_PG_CREATE_SUBSCRIPTION", ROLE_PG_CREATE_SUBSCRIPTION as i64),
    ];
    let got: Vec<(&str, i64)> = defs.iter().map(|(n, v)| (n.as_str(), *v)).collect();
    assert_eq!(got, expected);
}

#[test]
fn role_identifiers_are_distinct() {
    let oids: HashSet<Oid> = WELL_KNOWN_ROLES.iter().map(|r| r.oid).collect();
    assert_eq!(oids.len(), 15);
    let predefined = WELL_KNOWN_ROLES.iter().filter(|r| !r.is_bootstrap());
    for r in predefined {
        assert_ne!(r.oid, BOOTSTRAP_SUPERUSERID, "{} aliases the bootstrap superuser", r.name);
    }
}

#[test]
fn pg_authid_table_shape() {
    let table = registry::lookup_from_str("pg_catalog.pg_authid").expect("pg_authid registered");
    let df = table.build(&ctx("postgres")).unwrap();
    assert_eq!(df.shape(), (15, NATTS_PG_AUTHID));
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    let declared: Vec<String> = table.columns().iter().map(|c| c.name.to_string()).collect();
    assert_eq!(names, declared);

    let oid = df.column("oid").unwrap().as_materialized_series().u32().unwrap().clone();
    let rolname = df.column("rolname").unwrap().as_materialized_series().str().unwrap().clone();
    assert_eq!(oid.get(0), Some(BOOTSTRAP_SUPERUSERID));
    assert_eq!(rolname.get(0), Some("postgres"));
    let monitor = role_by_name("pg_monitor").unwrap();
    let idx = (0..df.height()).find(|i| oid.get(*i) == Some(monitor.oid)).unwrap();
    assert_eq!(rolname.get(idx), Some("pg_monitor"));

    let password = df.column("rolpassword").unwrap().as_materialized_series();
    assert_eq!(password.null_count(), 15);
}

#[test]
fn pg_roles_uses_configured_superuser_name() {
    let table = registry::lookup_from_str("pg_roles").unwrap();
    let df = table.build(&ctx("alice")).unwrap();
    let rolname = df.column("rolname").unwrap().as_materialized_series().str().unwrap().clone();
    assert_eq!(rolname.get(0), Some("alice"));
    let super_flags = df.column("rolsuper").unwrap().as_materialized_series().bool().unwrap().clone();
    assert_eq!(super_flags.get(0), Some(true));
    assert_eq!(super_flags.get(1), Some(false));
}

#[test]
fn pg_roles_masks_every_password() {
    let table = registry::lookup_from_str("pg_roles").unwrap();
    let df = table.build(&CatalogContext::default()).unwrap();
    let pw = df.column("rolpassword").unwrap().as_materialized_series();
    assert_eq!(pw.null_count(), 0);
    let pw = pw.str().unwrap().clone();
    assert_eq!(pw.get(0), Some("********"));
    assert_eq!(pw.get(df.height() - 1), Some("********"));
}

#[test]
fn pg_auth_members_lists_monitor_grants() {
    let table = registry::lookup_from_str("pg_catalog.pg_auth_members").unwrap();
    let df = table.build(&ctx("postgres")).unwrap();
    let member = df.column("member").unwrap().as_materialized_series().u32().unwrap().clone();
    let grantor = df.column("grantor").unwrap().as_materialized_series().u32().unwrap().clone();
    assert_eq!(df.height(), 3);
    for i in 0..df.height() {
        assert_eq!(member.get(i), Some(ROLE_PG_MONITOR));
        assert_eq!(grantor.get(i), Some(BOOTSTRAP_SUPERUSERID));
    }
}

#[test]
fn all_default_tables_are_registered() {
    let mut names: Vec<&'static str> = registry::all().iter().filter(|t| t.schema() == "pg_catalog").map(|t| t.name()).collect();
    names.sort();
    assert_eq!(names, vec!["pg_auth_members", "pg_authid", "pg_roles"]);
}
