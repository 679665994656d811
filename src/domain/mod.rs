pub mod models;
pub mod payload;
pub mod assessment;
pub mod errors;
pub mod ports;

pub use models::*;
pub use payload::*;
pub use assessment::*;
pub use errors::*;
pub use ports::*;
