//! Reslug Core Library
//!
//! Slug-to-identity resolution and duplicate reconciliation for content
//! records migrated between schemas:
//!
//! - [`slug`] splits a slug into base and hash fragment
//! - [`resolve`] finds every record a slug or id could refer to
//! - [`collisions`] finds records of different kinds claiming one slug
//! - [`deletion`] removes reviewed ids behind an explicit authorization
//!
//! All store access goes through the [`store::ContentStore`] traits.

pub mod collisions;
pub mod config;
pub mod deletion;
pub mod error;
pub mod format;
pub mod logging;
pub mod record;
pub mod records;
pub mod resolve;
pub mod slug;
pub mod store;
