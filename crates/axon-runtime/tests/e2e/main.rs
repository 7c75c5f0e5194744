//! End-to-end scenarios
//!
//! Every test here drives the full serve path: a scripted engine hands out
//! one call descriptor, the runtime builds the schema from a declaration
//! catalog, and the outcome is asserted on what went back over the boundary.

mod harness;

mod arguments;
mod constructors;
mod greeter;
mod interfaces;
mod recovery;
mod registration;
