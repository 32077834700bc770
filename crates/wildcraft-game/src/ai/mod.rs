//! Creature AI: state machine, movement, and population spawning.

pub mod brain;
pub mod movement;
pub mod spawning;
pub mod state;
pub mod system;
