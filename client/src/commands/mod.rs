pub mod index_commands;
pub mod render;
pub mod stake_commands;
