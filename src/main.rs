//!
//! authid CLI
//! ----------
//! Inspect the `pg_authid` catalog metadata: dump the row descriptor as JSON,
//! list the well-known roles, print a synthesized system table, render the
//! generated macro header, or run the consistency checks.

use std::env;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use authid::config::{CatalogConfig, CatalogContext};
use authid::pg_authid::PG_AUTHID;
use authid::roles::{roles_json, validate_registry};
use authid::system_catalog::header::render_pg_authid_header;
use authid::system_catalog::registry;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--describe | --roles | --table <name> | --header | --check]\n\nFlags:\n  --describe        Print the pg_authid row descriptor as JSON\n  --roles           List well-known roles as JSON\n  --table <name>    Print a synthesized system table (pg_authid, pg_roles, pg_auth_members)\n  --header          Render the generated pg_authid_d.h macro header\n  --check           Validate descriptor and role registry invariants\n  -h, --help        Show this help\n\nEnvironment:\n  AUTHID_BOOTSTRAP_SUPERUSER   name shown for OID 10 (default: current OS user)\n  AUTHID_INCLUDE_PREDEFINED    list predefined pg_* roles (default: true)\n  RUST_LOG                     log filter (default: info)"
    );
}

/// Exit status for malformed command lines.
const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Describe,
    Roles,
    Table(String),
    Header,
    Check,
}

fn parse_args(args: &[String]) -> Result<Option<Mode>> {
    let mut mode: Option<Mode> = None;
    let mut i = 0;
    while i < args.len() {
        let next = match args[i].as_str() {
            "--describe" => Mode::Describe,
            "--roles" => Mode::Roles,
            "--header" => Mode::Header,
            "--check" => Mode::Check,
            "--table" => {
                let Some(name) = args.get(i + 1) else { bail!("--table requires a table name") };
                i += 1;
                Mode::Table(name.clone())
            }
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown argument '{}'", other),
        };
        if mode.is_some() { bail!("only one action may be given"); }
        mode = Some(next);
        i += 1;
    }
    Ok(Some(mode.unwrap_or(Mode::Check)))
}

fn main() -> Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("building log filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args: Vec<String> = env::args().collect();
    let program = if args.is_empty() { "authid".to_string() } else { args.remove(0) };

    let mode = match parse_args(&args) {
        Ok(Some(m)) => m,
        Ok(None) => { print_usage(&program); return Ok(()); }
        Err(e) => { eprintln!("{}", e); print_usage(&program); std::process::exit(USAGE_EXIT_CODE); }
    };

    let config = CatalogConfig::from_env();
    info!(
        target: "authid",
        "authid starting: bootstrap_superuser='{}', include_predefined={}",
        config.bootstrap_superuser, config.include_predefined
    );
    let ctx = CatalogContext::new(config);

    match mode {
        Mode::Describe => {
            println!("{}", serde_json::to_string_pretty(&PG_AUTHID)?);
        }
        Mode::Roles => {
            println!("{}", roles_json(&ctx.config)?);
        }
        Mode::Table(name) => {
            let Some(table) = registry::lookup_from_str(&name) else { bail!("no system table named '{}'", name) };
            let df = table.build(&ctx)?;
            println!("{}", df);
        }
        Mode::Header => {
            println!("{}", render_pg_authid_header()?);
        }
        Mode::Check => {
            PG_AUTHID.validate()?;
            validate_registry()?;
            info!(target: "authid", "pg_authid descriptor and role registry are consistent");
            println!("ok");
        }
    }
    Ok(())
}
