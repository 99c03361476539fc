// System catalog metadata: identifiers, row descriptors and synthesized tables.

pub mod oid;
pub mod descriptor;
pub mod registry;
pub mod pg_catalog;
pub mod header;
