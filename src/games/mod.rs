//! Game implementations.

pub mod sticks;
