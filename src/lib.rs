//! Elevation Quote - Consultation quote wizard and pricing estimator
//!
//! Implements the five-step "get a quote" form of the Elevation AI marketing
//! site: tier lookup tables, the pricing estimator, the wizard state machine
//! and the boundary that hands a finished request to an intake system.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
