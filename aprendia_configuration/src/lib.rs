//! This crate contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The configuration file is first deserialized into unvalidated ("unresolved")
//! structures, which are then turned into their validated ("resolved") counterparts.
//! Any check that serde can't express on its own (URL schemes, interval bounds,
//! tracing filter syntax) happens during that resolution step, so a [`Configuration`]
//! that exists is a configuration that is usable.

#![allow(rustdoc::private_intra_doc_links)]

mod error;
mod structure;
mod traits;
mod utilities;

pub use error::*;
pub use structure::*;
