//! Testimonial carousel: node construction, rendering into a [`Document`],
//! navigation activation and the top-level load-and-render sequence.
//!
//! [`Document`]: crate::page::Document

mod mount;
mod navigator;
pub(crate) mod render;
mod slide;
mod state;

pub use mount::{mount_testimonials, MountOutcome};
pub use navigator::{MarkupNavigator, Navigator};
pub use slide::{build_nodes, Indicator, Notice, Slide};
pub use state::CarouselState;

/// Identifiers of the carousel root and its two mount points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselIds {
    pub root: String,
    pub indicators: String,
    pub inner: String,
}

impl CarouselIds {
    pub fn new(root: &str, indicators: &str, inner: &str) -> Self {
        Self {
            root: root.to_string(),
            indicators: indicators.to_string(),
            inner: inner.to_string(),
        }
    }
}

impl Default for CarouselIds {
    fn default() -> Self {
        Self::new("reviewCarousel", "carouselIndicators", "carouselInner")
    }
}
