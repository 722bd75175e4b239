//! Core library for nhadat
//!
//! This crate implements the **Functional Core** of the nhadat listings
//! client: pure transformation functions with zero I/O. The companion
//! `nhadat` crate is the Imperative Shell that talks to the backend and
//! renders output.
//!
//! All functions here are deterministic and side-effect free, so they can be
//! tested with plain fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`price`]: price-range normalization (presets and the freeform slider)
//! - [`filter`]: the filter criteria value object and its wire parameters
//! - [`page`]: 1-based UI page / 0-based API page translation
//! - [`listing`]: backend wire models and listing request planning
//! - [`window`]: the bounded pagination window shown around the current page
//! - [`view`]: the listing view state machine with stale-response guarding

pub mod filter;
pub mod listing;
pub mod page;
pub mod price;
pub mod view;
pub mod window;
