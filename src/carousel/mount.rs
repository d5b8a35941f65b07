use std::time::Duration;

use super::navigator::Navigator;
use super::render::{check_surfaces, render, show_failure};
use super::slide::Notice;
use super::CarouselIds;
use crate::error::CarouselError;
use crate::page::Document;
use crate::review::ReviewLoader;

/// Result of one load-and-render sequence.
#[derive(Debug)]
pub enum MountOutcome {
    Rendered { slides: usize },
    /// The failure notice is showing; the error is kept for the caller to report.
    Failed(CarouselError),
}

/// Load the feed and build the carousel into `doc`.
///
/// Waits `grace_period` first so late mount points can appear. Errors never
/// escape: on any failure the content surface shows a single notice naming
/// the attempted path, the indicators are emptied, and the error is logged.
pub async fn mount_testimonials(
    loader: &ReviewLoader,
    data_path: &str,
    doc: &mut Document,
    ids: &CarouselIds,
    navigator: &mut dyn Navigator,
    grace_period: Duration,
) -> MountOutcome {
    if !grace_period.is_zero() {
        tokio::time::sleep(grace_period).await;
    }

    let result = load_and_render(loader, data_path, doc, ids, navigator).await;

    match result {
        Ok(slides) => {
            tracing::info!("Testimonial carousel ready with {} slides", slides);
            MountOutcome::Rendered { slides }
        }
        Err(e) => {
            let location = loader.describe(data_path);
            tracing::error!("Error loading testimonials from {}: {}", location, e);
            show_failure(doc, ids, Notice::load_failure(Some(data_path.to_string())));
            MountOutcome::Failed(e)
        }
    }
}

async fn load_and_render(
    loader: &ReviewLoader,
    data_path: &str,
    doc: &mut Document,
    ids: &CarouselIds,
    navigator: &mut dyn Navigator,
) -> Result<usize, CarouselError> {
    check_surfaces(doc, ids)?;
    let records = loader.load(data_path).await?;
    Ok(render(&records, doc, ids, navigator)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::MarkupNavigator;
    use crate::error::{LoadError, RenderError};
    use crate::page::MountPoint;
    use crate::review::loader::tests::loader_with;

    const FEED: &str = r#"[
        {"text":"Fast and tidy","author":"Lee","date":"March 2024","stars":5},
        {"text":"Would hire again","author":"Kim","date":"April 2024","stars":4.25,"reply":"Thank you Kim!"}
    ]"#;

    struct FailingNavigator;

    impl Navigator for FailingNavigator {
        fn activate(&mut self, _doc: &mut Document, _root_id: &str) -> Result<(), RenderError> {
            Err(RenderError::Navigation("widget unavailable".to_string()))
        }
    }

    fn navigator() -> MarkupNavigator {
        MarkupNavigator::new(Duration::from_millis(5000))
    }

    fn assert_failure_shown(doc: &Document, ids: &CarouselIds) {
        assert!(doc.mount(&ids.indicators).unwrap().is_empty());
        let inner = doc.mount(&ids.inner).unwrap();
        assert_eq!(inner.nodes.len(), 1);
        assert_eq!(inner.notices().count(), 1);
        assert_eq!(inner.slides().count(), 0);
        let notice = inner.notices().next().unwrap();
        assert_eq!(notice.path.as_deref(), Some("assets/reviews.json"));
    }

    #[tokio::test]
    async fn test_mount_success() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(200, FEED);

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(outcome, MountOutcome::Rendered { slides: 2 }));
        let inner = doc.mount(&ids.inner).unwrap();
        let slides: Vec<_> = inner.slides().collect();
        assert_eq!(slides[1].rating_text(), "4.3 stars");
        assert_eq!(slides[1].reply.as_deref(), Some("Thank you Kim!"));
        assert_eq!(
            doc.element(&ids.root).unwrap().attr("data-ride"),
            Some("carousel")
        );
    }

    #[tokio::test]
    async fn test_mount_404_shows_notice() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(404, "");

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(
            outcome,
            MountOutcome::Failed(CarouselError::Load(LoadError::HttpStatus(404)))
        ));
        assert_failure_shown(&doc, &ids);
    }

    #[tokio::test]
    async fn test_mount_not_json_shows_notice() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(200, "not json");

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(
            outcome,
            MountOutcome::Failed(CarouselError::Load(LoadError::MalformedData(_)))
        ));
        assert_failure_shown(&doc, &ids);
    }

    #[tokio::test]
    async fn test_mount_empty_feed() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(200, "[]");

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(outcome, MountOutcome::Rendered { slides: 0 }));
        assert!(doc.mount(&ids.indicators).unwrap().is_empty());
        assert!(doc.mount(&ids.inner).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mount_missing_surface_fails_loudly() {
        let ids = CarouselIds::default();
        let mut doc = Document::new("t").with_mount(MountPoint::new(&ids.inner));
        let loader = loader_with(200, FEED);

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(
            outcome,
            MountOutcome::Failed(CarouselError::Render(RenderError::MissingSurface(_)))
        ));
        assert_eq!(doc.mount(&ids.inner).unwrap().notices().count(), 1);
    }

    #[tokio::test]
    async fn test_activation_failure_leaves_only_notice() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(200, FEED);

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut FailingNavigator,
            Duration::ZERO,
        )
        .await;

        assert!(matches!(
            outcome,
            MountOutcome::Failed(CarouselError::Render(RenderError::Navigation(_)))
        ));
        assert_failure_shown(&doc, &ids);
    }

    #[tokio::test]
    async fn test_shared_surface_fails_before_fetch() {
        let ids = CarouselIds::new("reviewCarousel", "carouselInner", "carouselInner");
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(404, "");

        let outcome = mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(
            outcome,
            MountOutcome::Failed(CarouselError::Render(RenderError::SharedSurface(_)))
        ));
        let inner = doc.mount(&ids.inner).unwrap();
        assert_eq!(inner.nodes.len(), 1);
        assert_eq!(inner.notices().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_grace_period_elapses_before_fetch() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("t", &ids);
        let loader = loader_with(200, "[]");
        let started = tokio::time::Instant::now();

        mount_testimonials(
            &loader,
            "assets/reviews.json",
            &mut doc,
            &ids,
            &mut navigator(),
            Duration::from_millis(100),
        )
        .await;

        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
