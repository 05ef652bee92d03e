pub mod placement;
pub mod schedule;
pub mod session;
pub mod validation;
