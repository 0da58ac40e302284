//! diagnosense-client
//!
//! Talks to the prediction service: sends built requests over HTTP and
//! drives each page's submit/settle cycle.

pub mod error;
pub mod interpret;
pub mod session;
pub mod transport;
