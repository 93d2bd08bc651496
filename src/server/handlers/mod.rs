pub mod access;
pub mod nearby;
pub mod places;
