//! WebDriver layer: session construction and DOM query helpers.
//!
//! - [`driver::Driver`]: fantoccini client wrapper with launch flags and
//!   session-scoped capabilities
//! - [`page::Page`]: the handful of DOM queries the extraction routine needs

pub mod driver;
pub mod page;

pub use driver::{build_capabilities, build_launch_arguments, Driver};
pub use page::{is_wait_timeout, Page, PageElement};
