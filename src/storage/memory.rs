use crate::domain::{ConstellationId, Galaxy, ItemKey, RegionId, SystemId};
use crate::error::{Error, Result};
use crate::progress::ProgressSink;
use crate::storage::rows::{ConstellationRow, ItemRow, RegionRow, SystemRow};
use crate::storage::traits::StaticDataStore;

/// Fixture-backed store for development and testing. Same contracts as the
/// SQLite store, including the zero-match search sentinel.
#[derive(Debug, Default)]
pub struct MemoryStore {
    systems: Vec<(i64, SystemRow)>,
    regions: Vec<(i64, RegionRow)>,
    items: Vec<ItemRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, galaxy: Galaxy, row: SystemRow) -> Self {
        self.systems.push((galaxy.filter_id(), row));
        self
    }

    pub fn with_region(mut self, galaxy: Galaxy, row: RegionRow) -> Self {
        self.regions.push((galaxy.filter_id(), row));
        self
    }

    pub fn with_item(mut self, row: ItemRow) -> Self {
        self.items.push(row);
        self
    }

    fn item_matches(item: &ItemRow, key: &ItemKey) -> bool {
        match key {
            ItemKey::ById(id) => item.pk == *id,
            ItemKey::ByName(name) => item.name.eq_ignore_ascii_case(name),
        }
    }
}

impl StaticDataStore for MemoryStore {
    fn search_systems_by_prefix(&self, prefix: &str) -> Result<Option<Vec<SystemRow>>> {
        let needle = prefix.to_lowercase();
        let mut hits: Vec<SystemRow> = self
            .systems
            .iter()
            .filter(|(_, s)| s.name.to_lowercase().starts_with(&needle))
            .map(|(_, s)| s.clone())
            .collect();
        if hits.is_empty() {
            return Ok(None);
        }
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(hits))
    }

    fn system_by_id(&self, pk: SystemId) -> Result<SystemRow> {
        self.systems
            .iter()
            .find(|(_, s)| s.pk == pk)
            .map(|(_, s)| s.clone())
            .ok_or(Error::RowNotFound {
                table: "systems",
                pk,
            })
    }

    fn constellation_by_id(&self, pk: ConstellationId) -> Result<ConstellationRow> {
        self.systems
            .iter()
            .find(|(_, s)| s.constellation.pk == pk)
            .map(|(_, s)| s.constellation.clone())
            .ok_or(Error::RowNotFound {
                table: "constellations",
                pk,
            })
    }

    fn region_by_id(&self, pk: RegionId) -> Result<RegionRow> {
        self.regions
            .iter()
            .map(|(_, r)| r)
            .chain(self.systems.iter().map(|(_, s)| &s.constellation.region))
            .find(|r| r.pk == pk)
            .cloned()
            .ok_or(Error::RowNotFound {
                table: "regions",
                pk,
            })
    }

    fn stargates_from(&self, pk: SystemId) -> Result<Vec<SystemId>> {
        Ok(self
            .systems
            .iter()
            .find(|(_, s)| s.pk == pk)
            .map(|(_, s)| s.stargates.clone())
            .unwrap_or_default())
    }

    fn systems_in_galaxy(
        &self,
        galaxy: Galaxy,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<SystemRow>> {
        let mut hits: Vec<SystemRow> = self
            .systems
            .iter()
            .filter(|(g, _)| *g == galaxy.filter_id())
            .map(|(_, s)| s.clone())
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        let total = hits.len();
        progress.begin("Collecting stargates", total);
        for i in 0..total {
            progress.update(i + 1, total);
        }
        Ok(hits)
    }

    fn regions_in_galaxy(&self, galaxy: Galaxy) -> Result<Vec<RegionRow>> {
        let mut hits: Vec<RegionRow> = self
            .regions
            .iter()
            .filter(|(g, _)| *g == galaxy.filter_id())
            .map(|(_, r)| r.clone())
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits)
    }

    fn item(&self, key: &ItemKey) -> Result<Option<ItemRow>> {
        Ok(self
            .items
            .iter()
            .find(|i| Self::item_matches(i, key))
            .cloned())
    }

    fn items_in_group(&self, key: &ItemKey) -> Result<Vec<ItemRow>> {
        let mut hits: Vec<ItemRow> = self
            .items
            .iter()
            .filter(|i| match key {
                ItemKey::ById(id) => i.group.pk == *id,
                ItemKey::ByName(name) => i.group.name.eq_ignore_ascii_case(name),
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits)
    }

    fn items_in_category(&self, key: &ItemKey) -> Result<Vec<ItemRow>> {
        let mut hits: Vec<ItemRow> = self
            .items
            .iter()
            .filter(|i| match key {
                ItemKey::ById(id) => i.group.category.pk == *id,
                ItemKey::ByName(name) => i.group.category.name.eq_ignore_ascii_case(name),
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits)
    }
}
