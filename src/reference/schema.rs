use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Material identifier as supplied by the caller.
///
/// `Aluminum` and `Aluminium` are spellings of the same metal; tables are
/// only ever keyed by [`Material::canonical`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Aluminium,
    Aluminum,
    Copper,
    Steel,
    Calcium,
    Lithium,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Aluminium,
        Material::Aluminum,
        Material::Copper,
        Material::Steel,
        Material::Calcium,
        Material::Lithium,
    ];

    /// One entry per physical material.
    pub const CANONICAL: [Material; 5] = [
        Material::Aluminium,
        Material::Copper,
        Material::Steel,
        Material::Calcium,
        Material::Lithium,
    ];

    pub fn canonical(self) -> Material {
        match self {
            Self::Aluminum => Self::Aluminium,
            other => other,
        }
    }

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Aluminium => "aluminium",
            Self::Aluminum => "aluminum",
            Self::Copper => "copper",
            Self::Steel => "steel",
            Self::Calcium => "calcium",
            Self::Lithium => "lithium",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self.canonical() {
            Self::Copper => "Cu",
            Self::Steel => "Fe",
            Self::Calcium => "Ca",
            Self::Lithium => "Li",
            _ => "Al",
        }
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Aluminium => "Aluminium",
            Self::Aluminum => "Aluminum",
            Self::Copper => "Copper",
            Self::Steel => "Steel",
            Self::Calcium => "Calcium",
            Self::Lithium => "Lithium",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown material: {0}")]
pub struct MaterialParseError(pub String);

impl FromStr for Material {
    type Err = MaterialParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "aluminium" | "al" => Ok(Self::Aluminium),
            "aluminum" => Ok(Self::Aluminum),
            "copper" | "cu" => Ok(Self::Copper),
            "steel" | "fe" => Ok(Self::Steel),
            "calcium" | "ca" => Ok(Self::Calcium),
            "lithium" | "li" => Ok(Self::Lithium),
            _ => Err(MaterialParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Primary,
    Secondary,
    Hybrid,
}

impl RouteKind {
    pub const ALL: [RouteKind; 3] = [RouteKind::Primary, RouteKind::Secondary, RouteKind::Hybrid];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Hybrid => "hybrid",
        }
    }
}

impl Display for RouteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown production route: {0}")]
pub struct RouteKindParseError(pub String);

impl FromStr for RouteKind {
    type Err = RouteKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "virgin" => Ok(Self::Primary),
            "secondary" | "recycled" => Ok(Self::Secondary),
            "hybrid" | "blend" => Ok(Self::Hybrid),
            _ => Err(RouteKindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridRegion {
    #[serde(rename = "IN")]
    India,
    #[serde(rename = "EU")]
    EuropeanUnion,
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "CN")]
    China,
    #[serde(rename = "OTHER")]
    Other,
}

impl GridRegion {
    pub const ALL: [GridRegion; 5] = [
        GridRegion::India,
        GridRegion::EuropeanUnion,
        GridRegion::UnitedStates,
        GridRegion::China,
        GridRegion::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::India => "IN",
            Self::EuropeanUnion => "EU",
            Self::UnitedStates => "US",
            Self::China => "CN",
            Self::Other => "OTHER",
        }
    }
}

impl Display for GridRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error)]
#[error("unknown grid region: {0}")]
pub struct GridRegionParseError(pub String);

impl FromStr for GridRegion {
    type Err = GridRegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" | "INDIA" => Ok(Self::India),
            "EU" => Ok(Self::EuropeanUnion),
            "US" | "USA" => Ok(Self::UnitedStates),
            "CN" | "CHINA" => Ok(Self::China),
            "OTHER" | "GLOBAL" => Ok(Self::Other),
            _ => Err(GridRegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Truck,
    Rail,
    Sea,
    Air,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Truck,
        TransportMode::Rail,
        TransportMode::Sea,
        TransportMode::Air,
    ];
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Truck => "Truck",
            Self::Rail => "Rail",
            Self::Sea => "Sea",
            Self::Air => "Air",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FuelCategory {
    NaturalGas,
    Coal,
    Oil,
    Lpg,
    Other,
}

impl FuelCategory {
    pub const ALL: [FuelCategory; 5] = [
        FuelCategory::NaturalGas,
        FuelCategory::Coal,
        FuelCategory::Oil,
        FuelCategory::Lpg,
        FuelCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NaturalGas => "Natural gas",
            Self::Coal => "Coal",
            Self::Oil => "Oil",
            Self::Lpg => "LPG",
            Self::Other => "Other",
        }
    }
}

/// Percentage share per fuel category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FuelMix {
    pub natural_gas: f64,
    pub coal: f64,
    pub oil: f64,
    pub lpg: f64,
    pub other: f64,
}

impl FuelMix {
    pub const fn new(natural_gas: f64, coal: f64, oil: f64, lpg: f64, other: f64) -> Self {
        Self {
            natural_gas,
            coal,
            oil,
            lpg,
            other,
        }
    }

    pub fn share(&self, category: FuelCategory) -> f64 {
        match category {
            FuelCategory::NaturalGas => self.natural_gas,
            FuelCategory::Coal => self.coal,
            FuelCategory::Oil => self.oil,
            FuelCategory::Lpg => self.lpg,
            FuelCategory::Other => self.other,
        }
    }

    pub fn shares(&self) -> impl Iterator<Item = (FuelCategory, f64)> + '_ {
        FuelCategory::ALL.into_iter().map(|c| (c, self.share(c)))
    }

    pub fn total(&self) -> f64 {
        self.shares().map(|(_, v)| v).sum()
    }
}
