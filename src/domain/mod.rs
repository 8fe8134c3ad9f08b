// Domain layer: the classification record and the ports the pipeline talks through.

pub mod model;
pub mod ports;
