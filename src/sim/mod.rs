//! Simulation core
//!
//! Everything that advances the game lives here:
//! - Entities and their per-kind behaviour
//! - Fixed-capacity pools, one per kind
//! - Collision passes and the garbage sweep
//! - Wave/session state and the frame driver
//!
//! No rendering, and no platform code beyond the capability traits.

pub mod asteroid;
pub mod collision;
pub mod context;
pub mod debris;
pub mod enemy;
pub mod entity;
pub mod pool;
pub mod projectile;
pub mod ship;
pub mod spawner;
pub mod star;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, discs_overlap};
pub use context::{FrameContext, Services, SpawnRequest, WorldBounds};
pub use entity::{Entity, EntityKind, EntityType};
pub use pool::{EntityHandle, Pool, Pools};
pub use ship::ShipCommand;
pub use spawner::{Spawner, WaveCounts, wave_counts};
pub use state::{Outcome, Phase, SessionState};
pub use tick::{AttractAnimation, Game};
