pub mod aggregate;
pub mod breaks;
pub mod route;
pub mod waiting;
