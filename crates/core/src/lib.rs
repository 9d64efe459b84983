//! # Slotwise Core
//!
//! Domain logic for the appointment booking engine: business availability
//! rules, slot computation, booking conflict policies, and the booking
//! transaction that commits against a store-enforced no-overlap guarantee.
//!
//! Everything in this crate except [`booking`] is pure and synchronous;
//! I/O happens only through the repository traits in [`repository`], which
//! the `slotwise-db` crate implements.

pub mod booking;
pub mod clock;
pub mod conflict;
pub mod errors;
pub mod models;
pub mod repository;
pub mod slots;
pub mod time;
