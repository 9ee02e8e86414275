//! Error types for the `bastion-world` crate.

use bastion_types::ZoneId;

/// Errors that can occur while building the settlement layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The zone list is empty.
    #[error("zone layout is empty")]
    EmptyLayout,

    /// The Keep must be the innermost (last) zone.
    #[error("the Keep must be the innermost zone")]
    KeepNotInnermost,

    /// A zone appears more than once.
    #[error("duplicate zone in layout: {0}")]
    DuplicateZone(ZoneId),
}
