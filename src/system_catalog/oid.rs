//! Object identifier primitives shared by catalog definitions.

/// Stable identifier of a catalog object (relation, index, type, role).
pub type Oid = u32;

/// 1-based ordinal position of a column within a catalog row.
pub type AttrNumber = i16;

pub const INVALID_OID: Oid = 0;

#[inline]
pub const fn oid_is_valid(oid: Oid) -> bool { oid != INVALID_OID }
