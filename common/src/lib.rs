pub mod model;
pub mod ops;
pub mod requests;
