// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Application services: the adoption lifecycle engine, account flows,
//! catalog/directory CRUD and the notification worker.

pub mod account;
pub mod adoption;
pub mod adoption_service;
pub mod catalog;
pub mod notification_worker;
