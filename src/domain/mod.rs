// Domain layer: ports (interfaces) and the small value types they exchange.

pub mod model;
pub mod ports;
