pub mod joblog;
pub mod lemon8;
pub mod msstore;
pub mod stats;

pub use lemon8::Lemon8Harvester;
pub use msstore::MsStoreHarvester;
pub use stats::HarvestStats;
