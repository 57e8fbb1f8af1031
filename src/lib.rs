//! Tangram placement core (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so hosts and the
//! integration tests can write `tangram::{core, engine, types}`.

pub use tangram_core as core;
pub use tangram_engine as engine;
pub use tangram_types as types;
