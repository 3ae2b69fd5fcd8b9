pub mod board;
pub mod rules;
pub mod stoch;

pub use board::*;
pub use rules::*;
pub use stoch::*;
