pub mod staking;
pub use staking::*;

pub mod token;
pub use token::*;
