pub mod body;
pub mod c_api;
pub mod config;
pub mod error;
pub mod gravity;
pub mod orbit;
pub mod registry;
pub mod simulation;
pub mod trail;
pub mod utils;

pub use body::{Body, BodyKind};
pub use config::SimulationConfig;
pub use error::{InvalidBodyError, SimResult};
pub use gravity::Gravity;
pub use orbit::orbit_velocity;
pub use registry::BodyRegistry;
pub use simulation::{SimState, Simulation};
pub use trail::{Trail, TrailRecorder};
pub use ultraviolet;
