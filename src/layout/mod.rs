pub mod shelf;
pub mod sizing;
pub mod solver;
