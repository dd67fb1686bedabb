// Domain layer: session models and ports (interfaces). No behavior beyond
// membership/equality checks; the draw algorithm lives in core.

pub mod model;
pub mod ports;
