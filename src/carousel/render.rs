use super::navigator::Navigator;
use super::slide::{build_nodes, Notice};
use super::CarouselIds;
use crate::error::RenderError;
use crate::page::{Document, Node};
use crate::review::ReviewRecord;

/// Render `records` into the indicator and content mount points of `doc`,
/// then activate navigation once. Returns the number of slides.
///
/// Both mount points are checked before anything is touched, and every node
/// is built before either surface is cleared, so a failure never leaves a
/// partially filled carousel behind.
pub fn render(
    records: &[ReviewRecord],
    doc: &mut Document,
    ids: &CarouselIds,
    navigator: &mut dyn Navigator,
) -> Result<usize, RenderError> {
    check_surfaces(doc, ids)?;

    let (indicators, slides) = build_nodes(records, &ids.root);
    let count = slides.len();

    doc.replace_nodes(
        &ids.indicators,
        indicators.into_iter().map(Node::Indicator).collect(),
    );
    doc.replace_nodes(&ids.inner, slides.into_iter().map(Node::Slide).collect());

    navigator.activate(doc, &ids.root)?;
    tracing::debug!("Rendered {} slides into #{}", count, ids.inner);
    Ok(count)
}

/// Replace the content surface with a single failure notice and empty the
/// indicator surface. Missing surfaces are skipped.
pub fn show_failure(doc: &mut Document, ids: &CarouselIds, notice: Notice) {
    doc.replace_nodes(&ids.indicators, Vec::new());
    if !doc.replace_nodes(&ids.inner, vec![Node::Notice(notice)]) {
        tracing::error!("Cannot show failure notice: mount point '{}' is missing", ids.inner);
    }
}

/// Both mount points must exist and be distinct.
pub(super) fn check_surfaces(doc: &Document, ids: &CarouselIds) -> Result<(), RenderError> {
    if ids.indicators == ids.inner {
        return Err(RenderError::SharedSurface(ids.inner.clone()));
    }
    for id in [&ids.indicators, &ids.inner] {
        if !doc.has_mount(id) {
            return Err(RenderError::MissingSurface(id.clone()));
        }
    }
    Ok(())
}
