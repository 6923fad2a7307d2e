//! # Core Types
//!
//! Value types shared by the registry, the resolution engine and the handlers.

pub mod descriptor;
pub mod format_tag;
pub mod value;

pub use descriptor::{raw, TypeDescriptor};
pub use format_tag::{tags, FormatTag};
pub use value::{Cell, Value};
