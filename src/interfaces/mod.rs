//! Presentation edges: HTML fragments for the web pages and CSV for batch
//! card checks.

pub mod csv;
pub mod html;
