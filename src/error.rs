use thiserror::Error;

use crate::reference::{GridRegion, Material, RouteKind, TransportMode};

/// A reference table does not cover a key the engine was asked about.
///
/// This is a data-integrity fault in the tables, never a user-input
/// problem, so callers should surface it rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("reference table `{table}` has no row for {material} ({route})")]
    MissingMaterialRow {
        table: &'static str,
        material: Material,
        route: RouteKind,
    },
    #[error("no grid emission factor for region {0}")]
    MissingGridRegion(GridRegion),
    #[error("no transport emission factor for mode {0}")]
    MissingTransportMode(TransportMode),
}
