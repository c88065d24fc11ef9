pub mod states;
pub mod params;
pub mod clock;
pub mod forces;
pub mod integrator;
pub mod trail;
pub mod scenario;
pub mod world;
