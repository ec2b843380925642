pub mod engine;
pub mod fitness;
pub mod interesting;
pub mod runner;
pub mod selection;
pub mod trace;
pub mod visits;
