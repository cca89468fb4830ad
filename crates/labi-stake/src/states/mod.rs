pub mod snapshots;
pub use snapshots::*;

pub mod stake_position;
pub use stake_position::*;

pub mod tx_state;
pub use tx_state::*;
