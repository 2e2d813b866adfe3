use anyhow::Result;
use eve_atlas::domain::{Galaxy, ItemKey};
use eve_atlas::error::Error;
use eve_atlas::progress::{ProgressSink, Silent};
use eve_atlas::storage::{SqliteStore, StaticDataStore};
use eve_atlas::Atlas;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

/// Seeds a small but realistic slice of the static data export: two
/// known-space regions plus one wormhole region, Jita and friends, and a
/// minimal item taxonomy.
fn seed_database() -> Result<(TempDir, PathBuf)> {
    let dir = tempdir()?;
    let db_path = dir.path().join("EVE.db");
    let conn = Connection::open(&db_path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE regions (
            id        INTEGER PRIMARY KEY,
            name      TEXT NOT NULL,
            galaxy_id INTEGER NOT NULL
        );
        CREATE TABLE constellations (
            id        INTEGER PRIMARY KEY,
            name      TEXT NOT NULL,
            region_id INTEGER NOT NULL
        );
        CREATE TABLE systems (
            id               INTEGER PRIMARY KEY,
            name             TEXT NOT NULL,
            constellation_id INTEGER NOT NULL,
            x REAL, y REAL, z REAL,
            security REAL
        );
        CREATE TABLE stargates (
            from_system_id INTEGER NOT NULL,
            to_system_id   INTEGER NOT NULL
        );
        CREATE TABLE group_categories (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );
        CREATE TABLE item_groups (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            category_id INTEGER NOT NULL
        );
        CREATE TABLE items (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            group_id    INTEGER NOT NULL
        );

        INSERT INTO regions VALUES
            (10000002, 'The Forge', 1),
            (10000043, 'Domain', 1),
            (11000001, 'A-R00001', 2);
        INSERT INTO constellations VALUES
            (20000020, 'Kimotoro', 10000002),
            (20000322, 'Throne Worlds', 10000043),
            (21000001, 'A-C00001', 11000001);
        INSERT INTO systems VALUES
            (30000142, 'Jita',      20000020, -1.29e17, 6.08e16, 1.17e17, 0.945),
            (30000144, 'Perimeter', 20000020, -1.30e17, 6.05e16, 1.16e17, 0.950),
            (30002187, 'Amarr',     20000322, -1.93e17, 9.67e16, -1.07e17, 1.0),
            (31000005, 'J100005',   21000001,  7.52e18, -1.10e17, 1.21e18, -1.0);
        INSERT INTO stargates VALUES
            (30000142, 30000144),
            (30000142, 30002187),
            (30000144, 30000142);

        INSERT INTO group_categories VALUES
            (4, 'Material'),
            (6, 'Ship');
        INSERT INTO item_groups VALUES
            (18, 'Mineral', 4),
            (25, 'Frigate', 6);
        INSERT INTO items VALUES
            (34,  'Tritanium', 'The most common mineral in New Eden.', 18),
            (35,  'Pyerite',   'A soft crystalline mineral.', 18),
            (587, 'Rifter',    'A fast and agile Minmatar frigate.', 25);
        "#,
    )?;
    Ok((dir, db_path))
}

fn atlas_over(db_path: &PathBuf) -> Atlas {
    Atlas::new(Arc::new(SqliteStore::new(db_path)))
}

#[derive(Default)]
struct Recording {
    updates: Vec<(usize, usize)>,
    finishes: usize,
}

impl ProgressSink for Recording {
    fn begin(&mut self, _label: &'static str, _total: usize) {}
    fn update(&mut self, done: usize, total: usize) {
        self.updates.push((done, total));
    }
    fn finish(&mut self, _elapsed: Duration) {
        self.finishes += 1;
    }
}

#[test]
fn jita_prefix_search_matches_the_canonical_example() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let systems = atlas.search_systems("jita")?;
    assert_eq!(systems.len(), 1);
    let jita = &systems[0];
    assert_eq!(jita.pk, 30000142);
    assert_eq!(jita.name, "Jita");
    assert_eq!(jita.constellation.name, "Kimotoro");
    assert_eq!(jita.constellation.region.name, "The Forge");
    assert!((jita.security - 0.945).abs() < 1e-9);
    Ok(())
}

#[test]
fn search_is_case_insensitive_and_name_ordered() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let store = SqliteStore::new(&db_path);

    let rows = store.search_systems_by_prefix("J")?.expect("matches");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["J100005", "Jita"]);

    let lower = store.search_systems_by_prefix("j")?.expect("matches");
    assert_eq!(lower.len(), rows.len());
    Ok(())
}

#[test]
fn zero_match_search_is_a_sentinel_then_an_error() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let store = SqliteStore::new(&db_path);

    assert!(store.search_systems_by_prefix("zzzznosuch")?.is_none());

    let err = atlas_over(&db_path).search_systems("zzzznosuch").unwrap_err();
    assert!(matches!(err, Error::SystemNameNotFound(p) if p == "zzzznosuch"));
    Ok(())
}

#[test]
fn absent_id_lookups_are_typed_errors_not_panics() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let store = SqliteStore::new(&db_path);

    assert!(matches!(
        store.system_by_id(1).unwrap_err(),
        Error::RowNotFound { table: "systems", pk: 1 }
    ));
    assert!(matches!(
        store.constellation_by_id(1).unwrap_err(),
        Error::RowNotFound { table: "constellations", pk: 1 }
    ));
    assert!(matches!(
        store.region_by_id(1).unwrap_err(),
        Error::RowNotFound { table: "regions", pk: 1 }
    ));
    Ok(())
}

#[test]
fn system_by_id_assembles_the_full_graph() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let jita = atlas.get_system(30000142)?;
    assert_eq!(jita.constellation.pk, 20000020);
    assert_eq!(jita.constellation.region.pk, 10000002);

    let mut gates = jita.stargates.clone();
    gates.sort_unstable();
    assert_eq!(gates, vec![30000144, 30002187]);
    Ok(())
}

#[test]
fn stargate_adjacency_is_directed() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let store = SqliteStore::new(&db_path);

    // Jita links out to Amarr, but Amarr has no gate back.
    assert!(store.stargates_from(30000142)?.contains(&30002187));
    assert!(store.stargates_from(30002187)?.is_empty());
    Ok(())
}

#[test]
fn galaxy_listing_filters_and_orders_by_name() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let systems = atlas.list_systems(Galaxy::NewEden, &mut Silent)?;
    let names: Vec<&str> = systems.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Amarr", "Jita", "Perimeter"]);
    for system in &systems {
        assert!(!system.constellation.name.is_empty());
        assert!(!system.constellation.region.name.is_empty());
    }

    let wormholes = atlas.list_systems(Galaxy::Anoikis, &mut Silent)?;
    assert_eq!(wormholes.len(), 1);
    assert_eq!(wormholes[0].name, "J100005");
    Ok(())
}

#[test]
fn verbose_listing_reports_progress_and_one_finish() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let mut progress = Recording::default();
    let systems = atlas.list_systems(Galaxy::NewEden, &mut progress)?;
    let n = systems.len();

    // store enrichment pass, then assembler build pass
    assert_eq!(progress.updates.len(), 2 * n);
    for (done, total) in &progress.updates {
        assert_eq!(*total, n);
        assert!(*done >= 1 && *done <= n);
    }
    assert_eq!(progress.finishes, 1);
    Ok(())
}

#[test]
fn region_listing_is_ordered_and_empty_for_empty_galaxies() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let regions = atlas.list_regions(Galaxy::NewEden)?;
    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Domain", "The Forge"]);

    assert!(atlas.list_regions(Galaxy::AbyssalSpace)?.is_empty());
    Ok(())
}

#[test]
fn item_lookup_accepts_both_key_forms() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let by_id = atlas.get_item(&ItemKey::ById(34))?;
    let by_name = atlas.get_item(&ItemKey::ByName("TRITANIUM".to_string()))?;
    assert_eq!(by_id, by_name);
    assert_eq!(by_id.group.name, "Mineral");
    assert_eq!(by_id.group.category.name, "Material");

    let err = atlas.get_item(&ItemKey::ById(999999)).unwrap_err();
    assert!(matches!(err, Error::ItemNotFound(_)));
    Ok(())
}

#[test]
fn group_and_category_listings_return_items_or_empty() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let minerals = atlas.items_in_group(&ItemKey::ByName("mineral".to_string()))?;
    let names: Vec<&str> = minerals.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Pyerite", "Tritanium"]);

    let ships = atlas.items_in_category(&ItemKey::ById(6))?;
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].name, "Rifter");
    assert_eq!(ships[0].group.name, "Frigate");

    assert!(atlas
        .items_in_group(&ItemKey::ByName("No Such Group".to_string()))?
        .is_empty());
    assert!(atlas.items_in_category(&ItemKey::ById(999))?.is_empty());
    Ok(())
}

#[test]
fn independently_assembled_entities_compare_by_pk() -> Result<()> {
    let (_dir, db_path) = seed_database()?;
    let atlas = atlas_over(&db_path);

    let first = atlas.get_system(30000142)?;
    let second = atlas.get_system(30000142)?;
    assert_eq!(first, second);
    assert_ne!(first, atlas.get_system(30000144)?);
    Ok(())
}
