use super::slide::{Indicator, Slide};
use super::CarouselIds;
use crate::error::RenderError;
use crate::page::Document;

/// Slides and indicators of an activated carousel plus the visible index.
///
/// When non-empty, exactly one slide and the indicator at the same index are
/// marked active. Only the navigation methods change `active_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    items: Vec<Slide>,
    indicators: Vec<Indicator>,
    active_index: usize,
}

impl CarouselState {
    pub fn new(items: Vec<Slide>, indicators: Vec<Indicator>) -> Result<Self, RenderError> {
        if items.len() != indicators.len() {
            return Err(RenderError::Navigation(format!(
                "{} slides but {} indicators",
                items.len(),
                indicators.len()
            )));
        }
        let active_index = items.iter().position(|s| s.active).unwrap_or(0);
        let mut state = Self {
            items,
            indicators,
            active_index,
        };
        state.sync_flags();
        Ok(state)
    }

    /// Collect the rendered carousel from the document's mount points.
    pub fn collect(doc: &Document, ids: &CarouselIds) -> Result<Self, RenderError> {
        let indicators = doc
            .mount(&ids.indicators)
            .ok_or_else(|| RenderError::MissingSurface(ids.indicators.clone()))?;
        let inner = doc
            .mount(&ids.inner)
            .ok_or_else(|| RenderError::MissingSurface(ids.inner.clone()))?;

        Self::new(
            inner.slides().cloned().collect(),
            indicators.indicators().cloned().collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> Option<&Slide> {
        self.items.get(self.active_index)
    }

    pub fn items(&self) -> &[Slide] {
        &self.items
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Jump to slide `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.active_index = index;
        self.sync_flags();
        true
    }

    /// Advance with wraparound.
    pub fn next(&mut self) {
        if !self.is_empty() {
            self.select((self.active_index + 1) % self.items.len());
        }
    }

    pub fn prev(&mut self) {
        if !self.is_empty() {
            let len = self.items.len();
            self.select((self.active_index + len - 1) % len);
        }
    }

    fn sync_flags(&mut self) {
        let active = self.active_index;
        for (i, slide) in self.items.iter_mut().enumerate() {
            slide.active = i == active;
        }
        for (i, indicator) in self.indicators.iter_mut().enumerate() {
            indicator.active = i == active;
        }
    }
}
