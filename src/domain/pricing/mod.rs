//! Pricing domain module.
//!
//! Static lookup tables and the quote estimator built on them.
//!
//! # Module Structure
//!
//! - `tier` - Slider positions and their range bands
//! - `industry` - Per-industry starting figures
//! - `add_on` - Optional add-ons and their flat contributions
//! - `estimator` - The pricing calculation

mod add_on;
mod estimator;
mod industry;
mod tier;

pub use add_on::{total_delta, AddOnDelta, AddOnId};
pub use estimator::{estimate, PricingResult};
pub use industry::{Industry, IndustryPricing};
pub use tier::{TierPosition, TierRange, TierTable};
