//! diagnosense-core
//!
//! Domain types and the request/response contract for the Diagnosense
//! prediction service. Nothing here does IO; forms, request building,
//! response normalization and chart shaping are all pure.

pub mod chart;
pub mod disease;
pub mod diseases;
pub mod error;
pub mod form;
pub mod models;
pub mod normalize;
pub mod request;
pub mod response;
