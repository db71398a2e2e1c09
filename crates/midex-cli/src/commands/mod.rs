//! CLI command implementations

pub mod cv_cache;
pub mod export;
pub mod imex_update;
pub mod validate_mitab;
