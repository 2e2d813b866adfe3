use crate::domain::{
    Category, Constellation, Galaxy, Group, Item, ItemKey, Region, System, SystemId,
};
use crate::error::{Error, Result};
use crate::progress::ProgressSink;
use crate::storage::rows::{ItemRow, SystemRow};
use crate::storage::StaticDataStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Domain assembler over the static data store. Turns flat row shapes into
/// fully parented entity graphs; every call hands back a fresh graph owned
/// by the caller.
pub struct Atlas {
    store: Arc<dyn StaticDataStore>,
}

impl Atlas {
    pub fn new(store: Arc<dyn StaticDataStore>) -> Self {
        Self { store }
    }

    /// Systems whose name starts with `prefix`, case-insensitive, ordered by
    /// name. Zero matches is an error, not an empty list.
    pub fn search_systems(&self, prefix: &str) -> Result<Vec<System>> {
        let rows = self
            .store
            .search_systems_by_prefix(prefix)?
            .ok_or_else(|| Error::SystemNameNotFound(prefix.to_string()))?;
        debug!(prefix, matches = rows.len(), "assembled system search");
        Ok(rows.into_iter().map(build_system).collect())
    }

    /// Every system in `galaxy`, reporting `x/y` build progress and a final
    /// elapsed-time summary to `progress`.
    pub fn list_systems(
        &self,
        galaxy: Galaxy,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<System>> {
        let start = Instant::now();
        let rows = self.store.systems_in_galaxy(galaxy, progress)?;
        let total = rows.len();
        progress.begin("Building systems", total);
        let mut systems = Vec::with_capacity(total);
        for (i, row) in rows.into_iter().enumerate() {
            systems.push(build_system(row));
            progress.update(i + 1, total);
        }
        progress.finish(start.elapsed());
        Ok(systems)
    }

    /// Regions of `galaxy`; an empty galaxy is a valid empty list.
    pub fn list_regions(&self, galaxy: Galaxy) -> Result<Vec<Region>> {
        let rows = self.store.regions_in_galaxy(galaxy)?;
        Ok(rows
            .into_iter()
            .map(|r| Region {
                pk: r.pk,
                name: r.name,
            })
            .collect())
    }

    pub fn get_system(&self, pk: SystemId) -> Result<System> {
        Ok(build_system(self.store.system_by_id(pk)?))
    }

    pub fn get_item(&self, key: &ItemKey) -> Result<Item> {
        let row = self
            .store
            .item(key)?
            .ok_or_else(|| Error::ItemNotFound(key.clone()))?;
        Ok(build_item(row))
    }

    pub fn items_in_group(&self, key: &ItemKey) -> Result<Vec<Item>> {
        Ok(self
            .store
            .items_in_group(key)?
            .into_iter()
            .map(build_item)
            .collect())
    }

    pub fn items_in_category(&self, key: &ItemKey) -> Result<Vec<Item>> {
        Ok(self
            .store
            .items_in_category(key)?
            .into_iter()
            .map(build_item)
            .collect())
    }
}

fn build_system(row: SystemRow) -> System {
    let region = Region {
        pk: row.constellation.region.pk,
        name: row.constellation.region.name,
    };
    let constellation = Constellation {
        pk: row.constellation.pk,
        name: row.constellation.name,
        region,
    };
    System {
        pk: row.pk,
        name: row.name,
        constellation,
        x: row.x,
        y: row.y,
        z: row.z,
        security: row.security,
        stargates: row.stargates,
    }
}

fn build_item(row: ItemRow) -> Item {
    let category = Category {
        pk: row.group.category.pk,
        name: row.group.category.name,
    };
    let group = Group {
        pk: row.group.pk,
        name: row.group.name,
        category,
    };
    Item {
        pk: row.pk,
        name: row.name,
        description: row.description,
        group,
    }
}
