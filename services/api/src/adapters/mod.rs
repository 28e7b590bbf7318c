pub mod catalog;
pub mod db;

pub use catalog::PgCatalogAdapter;
pub use db::PgScheduleRepository;
