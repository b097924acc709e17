//! Composite key scheme shared by the in-memory repositories.
//!
//! Entries are keyed `owner + "-" + id`, and ids are fixed-width zero-padded
//! decimal strings, so one owner's resources occupy a contiguous,
//! lexicographically sorted key range. The range-scan pagination in this
//! crate depends on that width: variable-width ids would break the string
//! comparison against the window boundaries.

/// Width of a zero-padded identifier.
pub(crate) const ID_WIDTH: usize = 12;

/// Compose the storage key for a resource under an owner.
pub(crate) fn key(owner: &str, id: &str) -> String {
    format!("{owner}-{id}")
}

/// Zero-pad a 1-based identifier to the fixed width.
pub(crate) fn pad_id(n: u64) -> String {
    format!("{n:0width$}", width = ID_WIDTH)
}
