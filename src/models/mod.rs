// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod book;
pub mod identity;
pub mod profile;

pub use book::BookRecord;
pub use identity::{IdentityMetadata, IdentityRecord};
pub use profile::{CounterField, ProviderEntry, UserProfile};
