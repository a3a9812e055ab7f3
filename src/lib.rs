//! platbody: tile-grid platformer body (axis-separated resolution, one-way
//! platforms, coyote time, corner correction)

pub mod types;
pub mod api;
pub mod ground;
pub mod body;
pub mod resolve;
pub mod tilemap;
pub mod config;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::ground::GroundState;
pub use crate::body::PlatBody;
pub use crate::tilemap::TileLayer;
pub use crate::config::{ConfigError, PhysicsConfig};
