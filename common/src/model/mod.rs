pub mod item;
pub mod step;
pub mod tutorial;
