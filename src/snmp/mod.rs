pub mod oid;
pub mod v2c;

pub use oid::{oid_in_branch, parse_oid, trailing_index};
pub use v2c::{SnmpClientV2c, value_as_i64};
