// Domain layer: the flight, its route and aircraft, and the seams (ports) the
// evaluator and presenters plug into.

pub mod model;
pub mod ports;
