use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type BopId = i32;

/// Blowout preventer, the asset valves are mounted on.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Bop {
    pub id: BopId,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Valve {
    pub id: i32,
    pub acronym: String,
    pub bop_id: BopId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValveView {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "VS1")]
    pub acronym: String,
    #[schema(example = 1)]
    pub bop_id: BopId,
}

impl From<Valve> for ValveView {
    fn from(valve: Valve) -> Self {
        Self {
            id: valve.id,
            acronym: valve.acronym,
            bop_id: valve.bop_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValveAcronym {
    #[schema(example = "VS1")]
    pub acronym: String,
}

/// Body of `GET /valvula/?bop_id=`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValveList {
    pub valvulas: Vec<ValveView>,
}

/// Body of `GET /valvula/all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AcronymList {
    pub valvulas: Vec<ValveAcronym>,
}
