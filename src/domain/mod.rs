//! Domain layer - Pure business logic.

pub mod dedup;
pub mod export;
pub mod media;
pub mod metadata;
