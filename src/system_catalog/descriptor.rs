//! Static row-schema descriptors for catalog relations.
//!
//! A descriptor ties a relation's identifiers (relation, rowtype, toast table and
//! index, lookup indexes) to its ordered column list. Descriptors are `const`
//! data; `validate` checks the structural invariants consumers rely on when they
//! address columns by attribute number.

use std::collections::HashSet;

use polars::prelude::DataType;
use serde::Serialize;

use super::oid::{oid_is_valid, AttrNumber, Oid};
use crate::error::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColType {
    Oid,
    Name,
    Bool,
    Int4,
    Text,
    TimestampTz,
}

impl ColType {
    /// OID of the matching `pg_type` entry.
    pub const fn type_oid(self) -> Oid {
        match self {
            ColType::Bool => 16,
            ColType::Name => 19,
            ColType::Int4 => 23,
            ColType::Text => 25,
            ColType::Oid => 26,
            ColType::TimestampTz => 1184,
        }
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            ColType::Bool => "bool",
            ColType::Name => "name",
            ColType::Int4 => "int4",
            ColType::Text => "text",
            ColType::Oid => "oid",
            ColType::TimestampTz => "timestamptz",
        }
    }

    /// Polars dtype used when the column is materialized into a frame.
    /// Timestamps are rendered as text.
    pub fn dtype(self) -> DataType {
        match self {
            ColType::Oid => DataType::UInt32,
            ColType::Int4 => DataType::Int32,
            ColType::Bool => DataType::Boolean,
            ColType::Name | ColType::Text | ColType::TimestampTz => DataType::String,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub coltype: ColType,
    pub attnum: AttrNumber,
    pub nullable: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, coltype: ColType, attnum: AttrNumber) -> Self {
        Self { name, coltype, attnum, nullable: false }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct IndexDef {
    pub oid: Oid,
    pub name: &'static str,
    pub keys: &'static [&'static str],
    pub unique: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CatalogDescriptor {
    pub schema: &'static str,
    pub relname: &'static str,
    pub relation_id: Oid,
    pub rowtype_id: Oid,
    pub toast_table: Oid,
    pub toast_index: Oid,
    /// Shared across all databases of a cluster.
    pub shared: bool,
    /// Declared attribute count; must equal `columns.len()`.
    pub natts: usize,
    pub indexes: &'static [IndexDef],
    pub columns: &'static [ColumnDef],
}

impl CatalogDescriptor {
    pub fn natts(&self) -> usize { self.natts }

    /// Column at a 1-based attribute number.
    pub fn column(&self, attnum: AttrNumber) -> Option<&'static ColumnDef> {
        if attnum < 1 { return None; }
        self.columns.iter().find(|c| c.attnum == attnum)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Attribute number for a column, or `NotFound`.
    pub fn attnum_of(&self, name: &str) -> AppResult<AttrNumber> {
        self.column_by_name(name).map(|c| c.attnum).ok_or_else(|| {
            AppError::not_found(
                "unknown_column".to_string(),
                format!("column \"{}\" of relation \"{}\" does not exist", name, self.relname),
            )
        })
    }

    /// Relation-level OIDs in declaration order: relation, rowtype, toast table,
    /// toast index, then each index.
    pub fn relation_oids(&self) -> Vec<(&'static str, Oid)> {
        let mut out = vec![
            ("relation", self.relation_id),
            ("rowtype", self.rowtype_id),
            ("toast_table", self.toast_table),
            ("toast_index", self.toast_index),
        ];
        for ix in self.indexes {
            out.push((ix.name, ix.oid));
        }
        out
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.natts != self.columns.len() {
            return Err(AppError::internal(
                "natts_mismatch".to_string(),
                format!("{}: declared {} attributes but defines {}", self.relname, self.natts, self.columns.len()),
            ));
        }
        let mut seen_nums: HashSet<AttrNumber> = HashSet::new();
        let mut seen_names: HashSet<String> = HashSet::new();
        for c in self.columns {
            if c.attnum < 1 || c.attnum as usize > self.columns.len() {
                return Err(AppError::internal(
                    "attnum_out_of_range".to_string(),
                    format!("{}.{}: attribute number {} outside 1..={}", self.relname, c.name, c.attnum, self.columns.len()),
                ));
            }
            if !seen_nums.insert(c.attnum) {
                return Err(AppError::internal(
                    "duplicate_attnum".to_string(),
                    format!("{}: attribute number {} used twice", self.relname, c.attnum),
                ));
            }
            if !seen_names.insert(c.name.to_ascii_lowercase()) {
                return Err(AppError::internal(
                    "duplicate_column".to_string(),
                    format!("{}: column \"{}\" defined twice", self.relname, c.name),
                ));
            }
        }
        // In range and no duplicates implies 1..=n with no gaps.
        let mut seen_oids: HashSet<Oid> = HashSet::new();
        for (what, oid) in self.relation_oids() {
            if !oid_is_valid(oid) {
                return Err(AppError::internal(
                    "invalid_oid".to_string(),
                    format!("{}: {} has invalid OID", self.relname, what),
                ));
            }
            if !seen_oids.insert(oid) {
                return Err(AppError::internal(
                    "duplicate_oid".to_string(),
                    format!("{}: OID {} assigned to {} is already used", self.relname, oid, what),
                ));
            }
        }
        for ix in self.indexes {
            if ix.keys.is_empty() {
                return Err(AppError::internal(
                    "empty_index".to_string(),
                    format!("{}: index {} has no key columns", self.relname, ix.name),
                ));
            }
            for k in ix.keys {
                if self.column_by_name(k).is_none() {
                    return Err(AppError::internal(
                        "unknown_index_key".to_string(),
                        format!("{}: index {} references missing column {}", self.relname, ix.name, k),
                    ));
                }
            }
        }
        Ok(())
    }
}
