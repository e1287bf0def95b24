//! # Rho Kernel
//!
//! Computes the scalar `rho` from a dot product `cdot` between two unit vectors
//! and a weighting parameter `beta`:
//!
//! ```text
//! rho = sqrt(1 + beta^2 * (cdot^2 - 1)) - beta * cdot
//! ```
//!
//! ## Architecture
//!
//! - **kernel**: the closed-form math as free functions (`calc_rho`, `try_calc_rho`)
//! - **RhoCalculator**: policy-aware scalar and elementwise batch evaluation
//! - **RhoConfig**: domain policy, batch parallelism and logging settings
//!
//! ## Domain policy
//!
//! A negative radicand has no real root. [`calc_rho`] lets the NaN propagate
//! exactly as IEEE arithmetic produces it; [`try_calc_rho`] and
//! [`DomainPolicy::Reject`] surface it as [`RhoError::NegativeRadicand`].
//!
//! ## Usage
//!
//! ```rust
//! use rho_kernel::{calc_rho, DomainPolicy, RhoCalculator};
//!
//! assert_eq!(calc_rho(0.5, 1.0), 0.0);
//! assert!(calc_rho(0.5, 10.0).is_nan());
//!
//! let calculator = RhoCalculator::with_policy(DomainPolicy::Reject);
//! assert!(calculator.rho(0.5, 10.0).is_err());
//!
//! let rhos = calculator.rho_batch_with_beta(&[-1.0, 1.0], 0.5).unwrap();
//! assert_eq!(rhos, vec![1.5, 0.5]);
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod kernel;
pub mod logging;


pub use calculator::RhoCalculator;
pub use config::{BatchConfig, DomainPolicy, LoggingConfig, RhoConfig};
pub use error::{Result, RhoError};
pub use kernel::{calc_rho, is_in_domain, radicand, try_calc_rho};
pub use logging::initialize_logging;

/// Default batch length at which evaluation moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
