use crate::domain::{ConstellationId, Galaxy, ItemKey, RegionId, SystemId};
use crate::error::Result;
use crate::progress::ProgressSink;
use crate::storage::rows::{ConstellationRow, ItemRow, RegionRow, SystemRow};

/// Query interface over the static data store. Implementations translate a
/// small fixed set of lookups into parameterized SQL (or fixture scans) and
/// return plain row shapes; they never construct domain entities.
pub trait StaticDataStore {
    /// Case-insensitive prefix search over system names, ordered by name.
    /// `None` is the zero-match sentinel, distinct from an empty list.
    fn search_systems_by_prefix(&self, prefix: &str) -> Result<Option<Vec<SystemRow>>>;

    fn system_by_id(&self, pk: SystemId) -> Result<SystemRow>;

    fn constellation_by_id(&self, pk: ConstellationId) -> Result<ConstellationRow>;

    fn region_by_id(&self, pk: RegionId) -> Result<RegionRow>;

    /// Destination system ids one hop from `pk`; empty when none.
    fn stargates_from(&self, pk: SystemId) -> Result<Vec<SystemId>>;

    /// Every system in `galaxy` with its full parent join. The stargate
    /// enrichment runs one sub-query per row and reports `x/y` progress.
    fn systems_in_galaxy(
        &self,
        galaxy: Galaxy,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<SystemRow>>;

    fn regions_in_galaxy(&self, galaxy: Galaxy) -> Result<Vec<RegionRow>>;

    /// Single item lookup by id or name. `None` when absent.
    fn item(&self, key: &ItemKey) -> Result<Option<ItemRow>>;

    fn items_in_group(&self, key: &ItemKey) -> Result<Vec<ItemRow>>;

    fn items_in_category(&self, key: &ItemKey) -> Result<Vec<ItemRow>>;
}
