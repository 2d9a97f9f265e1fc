// Domain layer: entities, registry and ports (interfaces).

pub mod lookup;
pub mod model;
pub mod ports;
pub mod registry;
