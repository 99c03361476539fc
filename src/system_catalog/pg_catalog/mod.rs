// pg_catalog tables backed by the authentication catalog.

pub mod pg_authid;
pub mod pg_auth_members;
pub mod pg_roles;
pub mod role_common;

pub fn register_defaults() {
    pg_authid::register();
    pg_roles::register();
    pg_auth_members::register();
}
