pub mod appointment;
pub mod business;
