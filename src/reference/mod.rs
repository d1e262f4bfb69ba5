pub mod schema;
pub mod tables;

pub use schema::{
    FuelCategory, FuelMix, GridRegion, GridRegionParseError, Material, MaterialParseError,
    RouteKind, RouteKindParseError, TransportMode,
};
pub use tables::{
    process_energy_mj_per_t, ReferenceTables, RouteDefaults, FUEL_EMISSION_FACTOR_KG_PER_MJ,
    KWH_TO_MJ,
};
