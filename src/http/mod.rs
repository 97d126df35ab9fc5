//! HTTP protocol layer module
//!
//! Response builders, MIME detection, and conditional-request helpers,
//! decoupled from the page and static-asset handlers that use them.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_500_response,
    build_html_response,
};
