pub mod batch;
pub mod stage;
pub mod stats;
