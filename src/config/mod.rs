pub mod fraction;
pub mod model;
