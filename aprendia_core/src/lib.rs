//! Data model shared between the Aprendia API client and the study engine.
//!
//! Everything here mirrors what the content-generation backend sends over the wire;
//! there is no behaviour beyond small accessors and (de)serialization helpers.

pub mod api_models;
pub mod generation;
pub mod ids;
