use std::time::Duration;

use crate::error::RenderError;
use crate::page::Document;

/// Capability that turns an already-populated carousel structure into a
/// navigable one (indicator clicks, prev/next, auto-advance).
///
/// Implementations must be idempotent: activating twice leaves the same state.
pub trait Navigator {
    fn activate(&mut self, doc: &mut Document, root_id: &str) -> Result<(), RenderError>;
}

/// Marks the carousel root for a browser-side carousel widget, which picks up
/// `data-ride` and `data-interval` on page load.
#[derive(Debug, Clone)]
pub struct MarkupNavigator {
    interval: Duration,
}

impl MarkupNavigator {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Navigator for MarkupNavigator {
    fn activate(&mut self, doc: &mut Document, root_id: &str) -> Result<(), RenderError> {
        let root = doc
            .element_mut(root_id)
            .ok_or_else(|| RenderError::MissingSurface(root_id.to_string()))?;
        root.set_attr("data-ride", "carousel");
        root.set_attr("data-interval", self.interval.as_millis().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselIds;

    #[test]
    fn test_markup_navigator_marks_root() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let mut nav = MarkupNavigator::new(Duration::from_millis(5000));

        nav.activate(&mut doc, &ids.root).unwrap();
        let snapshot = doc.clone();
        nav.activate(&mut doc, &ids.root).unwrap();

        assert_eq!(doc, snapshot);
        let root = doc.element(&ids.root).unwrap();
        assert_eq!(root.attr("data-ride"), Some("carousel"));
        assert_eq!(root.attr("data-interval"), Some("5000"));
    }

    #[test]
    fn test_markup_navigator_missing_root() {
        let mut doc = Document::new("t");
        let mut nav = MarkupNavigator::new(Duration::from_secs(5));
        assert_eq!(
            nav.activate(&mut doc, "reviewCarousel"),
            Err(RenderError::MissingSurface("reviewCarousel".to_string()))
        );
    }
}
