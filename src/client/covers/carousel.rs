use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::covers::pipeline::{CoverArt, CoverSubject};
use crate::client::covers::placeholder::placeholder_card;
use crate::client::covers::providers::CoverLookup;

/// Per-card stagger for the always-on-screen carousel
pub const CAROUSEL_STAGGER: Duration = Duration::from_millis(100);

/// Two-tier resolver for landing-page carousel cards.
///
/// The carousel is always on screen, so instead of visibility gating each
/// card waits `index x 100ms` before hitting the cover service, spreading
/// the burst across the row.
pub struct CarouselResolver {
    lookup: Arc<dyn CoverLookup>,
}

impl CarouselResolver {
    pub fn new(lookup: Arc<dyn CoverLookup>) -> Self {
        Self { lookup }
    }

    /// Resolves one carousel card: cover service by ISBN, then by
    /// title+author, then the placeholder. `None` means cancelled.
    pub async fn resolve(
        &self,
        subject: &CoverSubject,
        index: usize,
        cancel: &CancellationToken,
    ) -> Option<CoverArt> {
        tokio::select! {
            _ = tokio::time::sleep(CAROUSEL_STAGGER * index as u32) => {}
            _ = cancel.cancelled() => return None,
        }

        if let Some(isbn) = subject.isbn.as_deref() {
            let found = tokio::select! {
                found = self.lookup.cover_by_isbn(isbn) => found,
                _ = cancel.cancelled() => return None,
            };
            if let Ok(Some(url)) = found {
                return Some(CoverArt::Remote(url));
            }
        }

        let found = tokio::select! {
            found = self.lookup.cover_by_title_author(&subject.title, &subject.author) => found,
            _ = cancel.cancelled() => return None,
        };
        if let Ok(Some(url)) = found {
            return Some(CoverArt::Remote(url));
        }

        if cancel.is_cancelled() {
            return None;
        }

        Some(CoverArt::Placeholder(placeholder_card(
            &subject.title,
            &subject.author,
            index,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::covers::providers::MockCoverLookup;
    use crate::error::AppError;
    use mockall::Sequence;
    use tokio::time::Instant;

    fn subject(title: &str, author: &str, isbn: Option<&str>) -> CoverSubject {
        CoverSubject {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.map(String::from),
            stored_url: None,
        }
    }

    #[tokio::test]
    async fn test_isbn_hit_wins() {
        let mut lookup = MockCoverLookup::new();
        lookup
            .expect_cover_by_isbn()
            .returning(|_| Ok(Some("https://covers.example.com/dune.jpg".to_string())));
        lookup.expect_cover_by_title_author().never();

        let resolver = CarouselResolver::new(Arc::new(lookup));
        let art = resolver
            .resolve(
                &subject("Dune", "Frank Herbert", Some("9780441013593")),
                0,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(
            art,
            Some(CoverArt::Remote(
                "https://covers.example.com/dune.jpg".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_isbn_miss_falls_back_to_title_author() {
        let mut seq = Sequence::new();
        let mut lookup = MockCoverLookup::new();
        lookup
            .expect_cover_by_isbn()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        lookup
            .expect_cover_by_title_author()
            .withf(|title, author| title == "Dune" && author == "Frank Herbert")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Some("https://covers.example.com/kw.jpg".to_string())));

        let resolver = CarouselResolver::new(Arc::new(lookup));
        let art = resolver
            .resolve(
                &subject("Dune", "Frank Herbert", Some("9780441013593")),
                0,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(
            art,
            Some(CoverArt::Remote(
                "https://covers.example.com/kw.jpg".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_both_tiers_failing_ends_at_placeholder() {
        let mut lookup = MockCoverLookup::new();
        lookup
            .expect_cover_by_isbn()
            .returning(|_| Err(AppError::Internal("offline".to_string())));
        lookup
            .expect_cover_by_title_author()
            .returning(|_, _| Err(AppError::Internal("offline".to_string())));

        let resolver = CarouselResolver::new(Arc::new(lookup));
        let art = resolver
            .resolve(
                &subject("Dune", "Frank Herbert", Some("9780441013593")),
                4,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(art, Some(CoverArt::Placeholder(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stagger_scales_with_index() {
        let mut lookup = MockCoverLookup::new();
        lookup
            .expect_cover_by_title_author()
            .returning(|_, _| Ok(None));

        let resolver = CarouselResolver::new(Arc::new(lookup));
        let start = Instant::now();
        resolver
            .resolve(
                &subject("Dune", "Frank Herbert", None),
                3,
                &CancellationToken::new(),
            )
            .await;

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_cancelled_during_stagger_returns_none() {
        let lookup = MockCoverLookup::new();
        let resolver = CarouselResolver::new(Arc::new(lookup));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let art = resolver
            .resolve(&subject("Dune", "Frank Herbert", None), 5, &cancel)
            .await;
        assert_eq!(art, None);
    }
}
