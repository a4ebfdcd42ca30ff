// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Core library for the Rehome adoption platform.
//!
//! # Architecture
//!
//! - **domain** — aggregates, status machines, authorization policy, repository contracts
//! - **application** — services coordinating domain and infrastructure
//! - **infrastructure** — storage backends, event queue, token and password handling
//! - **presentation** — HTTP surface (axum)

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
