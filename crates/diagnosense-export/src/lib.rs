//! diagnosense-export
//!
//! Renders diagnosis outcomes: standalone HTML with SVG charts, and plain
//! text for terminals.

pub mod error;
pub mod html;
pub mod styles;
pub mod svg;
pub mod text;
