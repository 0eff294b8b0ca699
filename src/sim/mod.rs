pub mod driver;
pub mod pacer;
pub mod spec;

pub use driver::{Metrics, Simulation};
pub use pacer::{Pacer, BASE_INTERVAL};
pub use spec::ProcessSpec;
