// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod sync;

pub use sync::SyncService;
