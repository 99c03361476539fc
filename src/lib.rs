pub mod config;
pub mod error;
pub mod system_catalog;

pub use system_catalog::oid::{AttrNumber, Oid, INVALID_OID};
pub use system_catalog::pg_catalog::pg_authid;
pub use system_catalog::pg_catalog::role_common as roles;
