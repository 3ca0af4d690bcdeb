//! Core library for paddock
//!
//! This crate implements the **Functional Core** of the paddock service,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The paddock project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`paddock_core`** (this crate): Pure transformation functions with zero I/O
//! - **`paddock`**: Upstream HTTP calls, the HTTP surface and the CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with captured upstream fixtures, no mocking required
//!
//! # Module Organization
//!
//! - [`f1`]: Navigation of the upstream racing-statistics envelope and the
//!   projection of drivers, standings and races into stable output records
//! - [`html`]: Rendering of a standings table as an HTML page
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use paddock_core::f1::to_standings_table;
//! use paddock_core::html::render_standings_html;
//!
//! // `response` is the JSON document returned by the upstream API
//! let table = to_standings_table(&response)?;
//! let page = render_standings_html(&table);
//! ```

pub mod f1;
pub mod html;
