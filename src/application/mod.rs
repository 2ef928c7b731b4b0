// SPDX-License-Identifier: MPL-2.0
//! Application layer - the seams between the player core and its platform.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - The application layer depends on the domain layer (uses domain types)
//! - Infrastructure implements application layer ports
//! - The player core consumes ports, never concrete adapters

pub mod port;
