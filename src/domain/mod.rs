// Domain layer: models, ports and the static company table. No I/O here.

pub mod companies;
pub mod model;
pub mod ports;
