// Domain layer - Typed probe output

pub mod model;
