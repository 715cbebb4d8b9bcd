pub mod cell;
pub mod difficulty;
pub mod grid;
pub mod maze;
pub mod movement;
