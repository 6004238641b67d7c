//! Command implementations.

pub mod policies;
pub mod purge;
pub mod stats;
pub mod version;

pub use self::policies::execute_policies;
pub use self::purge::execute_purge;
pub use self::stats::execute_stats;
pub use self::version::execute_version;
