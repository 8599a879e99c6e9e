pub mod cdn;
pub mod db;

pub use cdn::CdnAdapter;
pub use db::DbAdapter;
