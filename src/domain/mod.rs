// Domain layer - Pure business logic

pub mod model;
pub mod rules;
