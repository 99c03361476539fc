//! Renders a catalog descriptor as the generated `<relname>_d.h` macro header
//! consumed by C code, and reads `#define` bindings back out of such a header.

use std::fmt::Write as _;

use crate::error::{AppError, AppResult};
use super::descriptor::CatalogDescriptor;
use super::pg_catalog::pg_authid::{PG_AUTHID, PG_AUTHID_HEADER_NAMES};
use super::pg_catalog::role_common::{WellKnownRole, WELL_KNOWN_ROLES};

/// Macro names for the relation-level identifiers. `indexes` runs parallel to
/// the descriptor's index list.
#[derive(Clone, Copy, Debug)]
pub struct HeaderNames {
    pub relation: &'static str,
    pub rowtype: &'static str,
    pub toast_table: &'static str,
    pub toast_index: &'static str,
    pub indexes: &'static [&'static str],
}

const BANNER_RULE: &str = "-------------------------------------------------------------------------";

fn write_banner(out: &mut String, relname: &str) -> std::fmt::Result {
    writeln!(out, "/*{}", BANNER_RULE)?;
    writeln!(out, " *")?;
    writeln!(out, " * {}_d.h", relname)?;
    writeln!(out, " *    Macro definitions for {}", relname)?;
    writeln!(out, " *")?;
    writeln!(out, " * Portions Copyright (c) 1996-2023, PostgreSQL Global Development Group")?;
    writeln!(out, " * Portions Copyright (c) 1994, Regents of the University of California")?;
    writeln!(out, " *")?;
    writeln!(out, " * NOTES")?;
    writeln!(out, " *  ******************************")?;
    writeln!(out, " *  *** DO NOT EDIT THIS FILE! ***")?;
    writeln!(out, " *  ******************************")?;
    writeln!(out, " *")?;
    writeln!(out, " *  It has been GENERATED by src/backend/catalog/genbki.pl")?;
    writeln!(out, " *")?;
    writeln!(out, " *{}", BANNER_RULE)?;
    writeln!(out, " */")
}

/// Render the macro header. Output is deterministic: the same inputs always
/// produce byte-identical text.
pub fn render_header(desc: &CatalogDescriptor, names: &HeaderNames, roles: &[WellKnownRole]) -> AppResult<String> {
    if names.indexes.len() != desc.indexes.len() {
        return Err(AppError::internal(
            "header_names_mismatch".to_string(),
            format!("{}: {} index macro names for {} indexes", desc.relname, names.indexes.len(), desc.indexes.len()),
        ));
    }
    let guard = format!("{}_D_H", desc.relname.to_ascii_uppercase());
    let mut out = String::new();
    write_banner(&mut out, desc.relname)?;
    writeln!(out, "#ifndef {}", guard)?;
    writeln!(out, "#define {}", guard)?;
    writeln!(out)?;

    let fixed = [names.relation, names.rowtype, names.toast_table, names.toast_index];
    let symbols = fixed.iter().chain(names.indexes.iter());
    for (sym, (_, oid)) in symbols.zip(desc.relation_oids()) {
        writeln!(out, "#define {} {}", sym, oid)?;
    }
    writeln!(out)?;

    for c in desc.columns {
        writeln!(out, "#define Anum_{}_{} {}", desc.relname, c.name, c.attnum)?;
    }
    writeln!(out)?;
    writeln!(out, "#define Natts_{} {}", desc.relname, desc.natts())?;

    if !roles.is_empty() {
        writeln!(out)?;
        for r in roles {
            writeln!(out, "#define {} {}", r.symbol, r.oid)?;
        }
    }
    writeln!(out)?;
    write!(out, "#endif\t\t\t\t\t\t\t/* {} */", guard)?;
    Ok(out)
}

pub fn render_pg_authid_header() -> AppResult<String> {
    render_header(&PG_AUTHID, &PG_AUTHID_HEADER_NAMES, WELL_KNOWN_ROLES)
}

/// Collect `#define NAME VALUE` bindings in file order. Valueless defines such as
/// include guards are skipped.
pub fn parse_defines(text: &str) -> AppResult<Vec<(String, i64)>> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("#define") { continue; }
        let Some(name) = parts.next() else { continue };
        let Some(raw) = parts.next() else { continue };
        let value = raw.parse::<i64>().map_err(|_| {
            AppError::user(
                "bad_define".to_string(),
                format!("line {}: value '{}' of {} is not an integer", lineno + 1, raw, name),
            )
        })?;
        out.push((name.to_string(), value));
    }
    Ok(out)
}
