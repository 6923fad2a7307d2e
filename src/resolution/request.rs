//! Normalized input to one handler lookup.

use crate::handler::HandlerRef;
use crate::types::{FormatTag, TypeDescriptor};

/// Declared type, optional explicit override and optional format tag for one
/// value being read or written.
///
/// Every request builder produces this same shape, so resolution cannot depend
/// on which call site asked.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    declared_type: TypeDescriptor,
    explicit_override: Option<HandlerRef>,
    format_tag: Option<FormatTag>,
}

impl ResolutionRequest {
    pub fn new(declared_type: TypeDescriptor) -> Self {
        Self {
            declared_type,
            explicit_override: None,
            format_tag: None,
        }
    }

    pub fn with_override(mut self, handler: impl Into<HandlerRef>) -> Self {
        self.explicit_override = Some(handler.into());
        self
    }

    pub fn with_format_tag(mut self, tag: impl Into<FormatTag>) -> Self {
        self.format_tag = Some(tag.into());
        self
    }

    pub fn with_optional_override(mut self, handler: Option<HandlerRef>) -> Self {
        self.explicit_override = handler;
        self
    }

    pub fn with_optional_format_tag(mut self, tag: Option<FormatTag>) -> Self {
        self.format_tag = tag;
        self
    }

    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    pub fn explicit_override(&self) -> Option<&HandlerRef> {
        self.explicit_override.as_ref()
    }

    pub fn format_tag(&self) -> Option<&FormatTag> {
        self.format_tag.as_ref()
    }
}
