pub mod reward_program;
pub mod stake_position;

pub use reward_program::*;
pub use stake_position::*;
