pub mod simulation;
pub mod configuration;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::states::{Body, TrailHistory, NVec2, Rgb};
pub use simulation::params::{Parameters, G, AU, BASE_TIMESTEP, TRAIL_CAPACITY};
pub use simulation::forces::{NewtonianGravity, ForceSample};
pub use simulation::integrator::verlet_integrator;
pub use simulation::clock::TimeControl;
pub use simulation::world::{SimulationWorld, BodyView, PlanetView};

pub use configuration::config::{ScenarioConfig, ParametersConfig, AnchorConfig, BodyConfig};

pub use error::{SimError, SimResult};

#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;
