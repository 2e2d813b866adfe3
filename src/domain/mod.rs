use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub type RegionId = i64;
pub type ConstellationId = i64;
pub type SystemId = i64;
pub type CategoryId = i64;
pub type GroupId = i64;
pub type ItemId = i64;

/// Entity identity lives in the primary key alone: two instances with the
/// same pk are the same entity no matter what the other fields say.
macro_rules! pk_identity {
    ($entity:ty) => {
        impl PartialEq for $entity {
            fn eq(&self, other: &Self) -> bool {
                self.pk == other.pk
            }
        }

        impl Eq for $entity {}

        impl Hash for $entity {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.pk.hash(state);
            }
        }
    };
}

/// Root of the spatial hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub pk: RegionId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constellation {
    pub pk: ConstellationId,
    pub name: String,
    pub region: Region,
}

/// A solar system with its full parent chain and outbound stargates.
///
/// Stargates are a directed adjacency list; a link back is usual but not
/// guaranteed by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub pk: SystemId,
    pub name: String,
    pub constellation: Constellation,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub security: f64,
    pub stargates: Vec<SystemId>,
}

/// Root of the item taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub pk: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub pk: GroupId,
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pk: ItemId,
    pub name: String,
    pub description: String,
    pub group: Group,
}

pk_identity!(Region);
pk_identity!(Constellation);
pk_identity!(System);
pk_identity!(Category);
pk_identity!(Group);
pk_identity!(Item);

/// Top-level partition of the map, used only as a filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Galaxy {
    NewEden,
    Anoikis,
    AbyssalSpace,
    VoidSpace,
    DeathlessSpace,
    JovianSpace,
    PochvenSpace,
}

impl Galaxy {
    /// The `galaxy_id` value this variant filters on in the store.
    pub fn filter_id(self) -> i64 {
        match self {
            Galaxy::NewEden => 1,
            Galaxy::Anoikis => 2,
            Galaxy::AbyssalSpace => 3,
            Galaxy::VoidSpace => 4,
            Galaxy::DeathlessSpace => 5,
            Galaxy::JovianSpace => 6,
            Galaxy::PochvenSpace => 7,
        }
    }
}

impl fmt::Display for Galaxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Galaxy::NewEden => "new-eden",
            Galaxy::Anoikis => "anoikis",
            Galaxy::AbyssalSpace => "abyssal",
            Galaxy::VoidSpace => "void",
            Galaxy::DeathlessSpace => "deathless",
            Galaxy::JovianSpace => "jovian",
            Galaxy::PochvenSpace => "pochven",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Galaxy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new-eden" | "new_eden" | "neweden" => Ok(Galaxy::NewEden),
            "anoikis" | "wormhole" => Ok(Galaxy::Anoikis),
            "abyssal" => Ok(Galaxy::AbyssalSpace),
            "void" => Ok(Galaxy::VoidSpace),
            "deathless" => Ok(Galaxy::DeathlessSpace),
            "jovian" => Ok(Galaxy::JovianSpace),
            "pochven" => Ok(Galaxy::PochvenSpace),
            other => Err(format!(
                "unknown galaxy '{other}' (expected one of: new-eden, anoikis, abyssal, void, deathless, jovian, pochven)"
            )),
        }
    }
}

/// Lookup key for item/group/category queries. Callers say up front whether
/// they hold an id or a name instead of the store sniffing the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKey {
    ById(i64),
    ByName(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::ById(id) => write!(f, "id {id}"),
            ItemKey::ByName(name) => write!(f, "name '{name}'"),
        }
    }
}
