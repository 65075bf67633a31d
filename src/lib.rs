// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # BigFix Server Automation client
//!
//! A small client for the BigFix REST API and its Server Automation extension.
//!
//! ## Overview
//!
//! The client covers the automation plan lifecycle:
//!
//! 1. **List** automation plans with a relevance query
//! 2. **Fetch** a plan's execution template
//! 3. **Execute** a completed template, creating a plan action
//! 4. **Poll** the plan action's status until the server stops reporting it
//!
//! Every step is a single authenticated HTTP request. Non-200 responses come
//! back as an absent result; transport failures are errors.
//!
//! ## Modules
//!
//! - [`config`]: Configuration file, environment overrides and credentials
//! - [`bigfix`]: API client, relevance query and action watcher
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! server:
//!   api_url: https://rootserver:52311/api
//!   sa_url: https://saserver:8443/serverautomation
//! site:
//!   type: custom
//!   name: name custom site
//! run:
//!   plan_id: 125176
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod bigfix;
pub mod cli;
pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use bigfix::{ActionWatcher, BigFixClient, ListedPlan, PlanQuery, PlanReference, WatchOutcome};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ClientConfig, ConfigParser, ConfigValidator, Credentials};
pub use error::{BigFixError, Result};
