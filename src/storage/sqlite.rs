use crate::domain::{ConstellationId, Galaxy, ItemKey, RegionId, SystemId};
use crate::error::{Error, Result};
use crate::progress::ProgressSink;
use crate::storage::rows::{
    CategoryRow, ConstellationRow, GroupRow, ItemRow, RegionRow, SystemRow,
};
use crate::storage::traits::StaticDataStore;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use tracing::debug;

const ITEM_SELECT: &str = "SELECT items.id, items.name, items.description, \
     item_groups.id, item_groups.name, \
     group_categories.id, group_categories.name \
     FROM items \
     JOIN item_groups ON item_groups.id = items.group_id \
     JOIN group_categories ON group_categories.id = item_groups.category_id";

/// SQLite-backed store over the static data export. Holds only the database
/// path; every call opens its own read-only connection and releases it when
/// the call returns.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    fn region_row(&self, conn: &Connection, pk: RegionId) -> Result<RegionRow> {
        let mut stmt = conn.prepare("SELECT name FROM regions WHERE id = ?1")?;
        let mut rows = stmt.query(params![pk])?;
        let row = rows.next()?.ok_or(Error::RowNotFound {
            table: "regions",
            pk,
        })?;
        Ok(RegionRow {
            pk,
            name: row.get(0)?,
        })
    }

    fn constellation_row(&self, conn: &Connection, pk: ConstellationId) -> Result<ConstellationRow> {
        let mut stmt = conn.prepare("SELECT name, region_id FROM constellations WHERE id = ?1")?;
        let mut rows = stmt.query(params![pk])?;
        let row = rows.next()?.ok_or(Error::RowNotFound {
            table: "constellations",
            pk,
        })?;
        let name: String = row.get(0)?;
        let region_pk: RegionId = row.get(1)?;
        let region = self.region_row(conn, region_pk)?;
        Ok(ConstellationRow { pk, name, region })
    }

    fn stargate_ids(&self, conn: &Connection, pk: SystemId) -> Result<Vec<SystemId>> {
        let mut stmt =
            conn.prepare("SELECT to_system_id FROM stargates WHERE from_system_id = ?1")?;
        let mut rows = stmt.query(params![pk])?;
        let mut stargates = Vec::new();
        while let Some(row) = rows.next()? {
            stargates.push(row.get(0)?);
        }
        Ok(stargates)
    }

    fn query_items(&self, sql: &str, key: &ItemKey) -> Result<Vec<ItemRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = match key {
            ItemKey::ById(id) => stmt.query(params![id])?,
            ItemKey::ByName(name) => stmt.query(params![name])?,
        };
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(read_item_row(row)?);
        }
        Ok(items)
    }
}

fn read_item_row(row: &Row<'_>) -> Result<ItemRow> {
    Ok(ItemRow {
        pk: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        group: GroupRow {
            pk: row.get(3)?,
            name: row.get(4)?,
            category: CategoryRow {
                pk: row.get(5)?,
                name: row.get(6)?,
            },
        },
    })
}

impl StaticDataStore for SqliteStore {
    fn search_systems_by_prefix(&self, prefix: &str) -> Result<Option<Vec<SystemRow>>> {
        let conn = self.connect()?;
        let pattern = format!("{}%", prefix.to_lowercase());
        debug!(prefix, "searching systems by name prefix");

        let mut base = Vec::new();
        {
            let mut stmt = conn.prepare(
                "SELECT id, name, constellation_id, x, y, z, security \
                 FROM systems WHERE LOWER(name) LIKE ?1 ORDER BY name",
            )?;
            let mut rows = stmt.query(params![pattern])?;
            while let Some(row) = rows.next()? {
                base.push((
                    row.get::<_, SystemId>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, ConstellationId>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, f64>(6)?,
                ));
            }
        }
        if base.is_empty() {
            return Ok(None);
        }

        let mut systems = Vec::with_capacity(base.len());
        for (pk, name, constellation_pk, x, y, z, security) in base {
            let constellation = self.constellation_row(&conn, constellation_pk)?;
            let stargates = self.stargate_ids(&conn, pk)?;
            systems.push(SystemRow {
                pk,
                name,
                x,
                y,
                z,
                security,
                constellation,
                stargates,
            });
        }
        Ok(Some(systems))
    }

    fn system_by_id(&self, pk: SystemId) -> Result<SystemRow> {
        let conn = self.connect()?;
        let (name, constellation_pk, x, y, z, security) = {
            let mut stmt = conn.prepare(
                "SELECT name, constellation_id, x, y, z, security FROM systems WHERE id = ?1",
            )?;
            let mut rows = stmt.query(params![pk])?;
            let row = rows.next()?.ok_or(Error::RowNotFound {
                table: "systems",
                pk,
            })?;
            (
                row.get::<_, String>(0)?,
                row.get::<_, ConstellationId>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
            )
        };
        let constellation = self.constellation_row(&conn, constellation_pk)?;
        let stargates = self.stargate_ids(&conn, pk)?;
        Ok(SystemRow {
            pk,
            name,
            x,
            y,
            z,
            security,
            constellation,
            stargates,
        })
    }

    fn constellation_by_id(&self, pk: ConstellationId) -> Result<ConstellationRow> {
        let conn = self.connect()?;
        self.constellation_row(&conn, pk)
    }

    fn region_by_id(&self, pk: RegionId) -> Result<RegionRow> {
        let conn = self.connect()?;
        self.region_row(&conn, pk)
    }

    fn stargates_from(&self, pk: SystemId) -> Result<Vec<SystemId>> {
        let conn = self.connect()?;
        self.stargate_ids(&conn, pk)
    }

    fn systems_in_galaxy(
        &self,
        galaxy: Galaxy,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<SystemRow>> {
        let conn = self.connect()?;
        debug!(%galaxy, "listing systems in galaxy");

        let mut base = Vec::new();
        {
            let mut stmt = conn.prepare(
                "SELECT systems.id, systems.name, systems.x, systems.y, systems.z, systems.security, \
                        constellations.id, constellations.name, \
                        regions.id, regions.name \
                 FROM systems \
                 JOIN constellations ON constellations.id = systems.constellation_id \
                 JOIN regions ON regions.id = constellations.region_id \
                 WHERE regions.galaxy_id = ?1 \
                 ORDER BY systems.name",
            )?;
            let mut rows = stmt.query(params![galaxy.filter_id()])?;
            while let Some(row) = rows.next()? {
                let region = RegionRow {
                    pk: row.get(8)?,
                    name: row.get(9)?,
                };
                let constellation = ConstellationRow {
                    pk: row.get(6)?,
                    name: row.get(7)?,
                    region,
                };
                base.push(SystemRow {
                    pk: row.get(0)?,
                    name: row.get(1)?,
                    x: row.get(2)?,
                    y: row.get(3)?,
                    z: row.get(4)?,
                    security: row.get(5)?,
                    constellation,
                    stargates: Vec::new(),
                });
            }
        }

        // One stargate sub-query per system.
        let total = base.len();
        progress.begin("Collecting stargates", total);
        for (i, system) in base.iter_mut().enumerate() {
            system.stargates = self.stargate_ids(&conn, system.pk)?;
            progress.update(i + 1, total);
        }
        Ok(base)
    }

    fn regions_in_galaxy(&self, galaxy: Galaxy) -> Result<Vec<RegionRow>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT id, name FROM regions WHERE galaxy_id = ?1 ORDER BY name")?;
        let mut rows = stmt.query(params![galaxy.filter_id()])?;
        let mut regions = Vec::new();
        while let Some(row) = rows.next()? {
            regions.push(RegionRow {
                pk: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(regions)
    }

    fn item(&self, key: &ItemKey) -> Result<Option<ItemRow>> {
        let sql = match key {
            ItemKey::ById(_) => format!("{ITEM_SELECT} WHERE items.id = ?1"),
            ItemKey::ByName(_) => format!("{ITEM_SELECT} WHERE LOWER(items.name) = LOWER(?1)"),
        };
        Ok(self.query_items(&sql, key)?.into_iter().next())
    }

    fn items_in_group(&self, key: &ItemKey) -> Result<Vec<ItemRow>> {
        let sql = match key {
            ItemKey::ById(_) => format!("{ITEM_SELECT} WHERE item_groups.id = ?1 ORDER BY items.name"),
            ItemKey::ByName(_) => format!(
                "{ITEM_SELECT} WHERE LOWER(item_groups.name) = LOWER(?1) ORDER BY items.name"
            ),
        };
        self.query_items(&sql, key)
    }

    fn items_in_category(&self, key: &ItemKey) -> Result<Vec<ItemRow>> {
        let sql = match key {
            ItemKey::ById(_) => {
                format!("{ITEM_SELECT} WHERE group_categories.id = ?1 ORDER BY items.name")
            }
            ItemKey::ByName(_) => format!(
                "{ITEM_SELECT} WHERE LOWER(group_categories.name) = LOWER(?1) ORDER BY items.name"
            ),
        };
        self.query_items(&sql, key)
    }
}
