//! Infrastructure layer: filesystem access and service wiring

pub mod di;
pub mod traits;
