//! Incrementally loaded listing ("infinite scroll").
//!
//! State machine:
//!
//! ```text
//! Idle --load_first--> LoadingFirst --ok--> Ready { more | exhausted }
//!                                   --err-> Failed
//! Ready(more) --begin_next--> Ready + fetching_next --complete_next--> Ready
//!                                                 --err-> Failed
//! Failed --load_first--> LoadingFirst
//! ```
//!
//! Pages are requested strictly in increasing index order: the next index
//! is always `last_loaded.number + 1`, and nothing is requested while a
//! fetch is in flight or after the backend reported the last page.

use crate::error::ApiError;
use crate::models::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    LoadingFirst,
    Ready,
    Failed(String),
}

/// Result of a fetch-more attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was appended with this many items
    Fetched(usize),
    /// The last page is already loaded; nothing was requested
    Exhausted,
    /// Not allowed right now (not ready, already fetching, sentinel hidden)
    Suppressed,
}

pub struct Paginated<T> {
    page_size: u32,
    pages: Vec<Page<T>>,
    state: FeedState,
    fetching_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: Vec::new(),
            state: FeedState::Idle,
            fetching_next: false,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_fetching_next(&self) -> bool {
        self.fetching_next
    }

    /// True when ready and the backend has not reported the last page
    pub fn has_next_page(&self) -> bool {
        self.state == FeedState::Ready && self.next_index().is_some()
    }

    fn next_index(&self) -> Option<u32> {
        self.pages.last().and_then(|p| p.next_index())
    }

    /// Every loaded item, in page order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|p| p.content.iter())
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.content.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages.len()
    }

    /// Backend's total count, as reported by the most recent page
    pub fn total_elements(&self) -> Option<u64> {
        self.pages.last().map(|p| p.total_elements)
    }

    /// Drop everything loaded so the next view starts from page 0
    pub fn invalidate(&mut self) {
        self.pages.clear();
        self.state = FeedState::Idle;
        self.fetching_next = false;
    }

    /// Enter `LoadingFirst` and return the page/size to request.
    /// Everything loaded so far is dropped.
    pub fn begin_first(&mut self) -> (u32, u32) {
        self.pages.clear();
        self.fetching_next = false;
        self.state = FeedState::LoadingFirst;
        (0, self.page_size)
    }

    /// Settle a request started by `begin_first`
    pub fn complete_first(
        &mut self,
        result: Result<Page<T>, ApiError>,
    ) -> Result<usize, ApiError> {
        match result {
            Ok(page) => {
                let count = page.content.len();
                self.pages.push(page);
                self.state = FeedState::Ready;
                Ok(count)
            }
            Err(e) => {
                self.state = FeedState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// (Re)load from page 0. The only way out of `Failed`.
    pub fn load_first<F>(&mut self, mut fetch: F) -> Result<usize, ApiError>
    where
        F: FnMut(u32, u32) -> Result<Page<T>, ApiError>,
    {
        let (page, size) = self.begin_first();
        let result = fetch(page, size);
        self.complete_first(result)
    }

    /// Claim the next page index, setting `fetching_next`.
    /// None when not ready, already fetching or exhausted.
    pub fn begin_next(&mut self) -> Option<u32> {
        if self.state != FeedState::Ready || self.fetching_next {
            return None;
        }
        let next = self.next_index()?;
        self.fetching_next = true;
        Some(next)
    }

    /// Settle a request started by `begin_next`
    pub fn complete_next(
        &mut self,
        result: Result<Page<T>, ApiError>,
    ) -> Result<FetchOutcome, ApiError> {
        self.fetching_next = false;
        match result {
            Ok(page) => {
                let count = page.content.len();
                self.pages.push(page);
                Ok(FetchOutcome::Fetched(count))
            }
            Err(e) => {
                self.state = FeedState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Load the page after the last one loaded, if permitted
    pub fn fetch_more<F>(&mut self, mut fetch: F) -> Result<FetchOutcome, ApiError>
    where
        F: FnMut(u32, u32) -> Result<Page<T>, ApiError>,
    {
        if self.state == FeedState::Ready && !self.fetching_next && self.next_index().is_none() {
            return Ok(FetchOutcome::Exhausted);
        }
        let Some(next) = self.begin_next() else {
            return Ok(FetchOutcome::Suppressed);
        };
        let result = fetch(next, self.page_size);
        self.complete_next(result)
    }

    /// Sentinel visibility report; only a visible sentinel triggers a fetch
    pub fn on_sentinel<F>(&mut self, visible: bool, fetch: F) -> Result<FetchOutcome, ApiError>
    where
        F: FnMut(u32, u32) -> Result<Page<T>, ApiError>,
    {
        if !visible {
            return Ok(FetchOutcome::Suppressed);
        }
        self.fetch_more(fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiArticleRepository, ArticleRepository};
    use crate::i18n::Locale;
    use crate::models::Article;
    use crate::testing::{article_page, article_page_json, ScriptedTransport};

    /// Fetcher over a fixed number of pages that logs every request
    struct Backend {
        total_pages: u32,
        count_per_page: u32,
        requested: Vec<(u32, u32)>,
        fail_on: Option<u32>,
    }

    impl Backend {
        fn new(total_pages: u32, count_per_page: u32) -> Self {
            Self {
                total_pages,
                count_per_page,
                requested: Vec::new(),
                fail_on: None,
            }
        }

        fn fetch(&mut self, page: u32, size: u32) -> Result<Page<Article>, ApiError> {
            self.requested.push((page, size));
            if self.fail_on == Some(page) {
                return Err(ApiError::Rejected {
                    status: 500,
                    message: "Failed to fetch articles".to_string(),
                });
            }
            Ok(article_page(page, size, self.count_per_page, self.total_pages))
        }
    }

    #[test]
    fn test_fetch_more_before_load_is_suppressed() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);
        let outcome = feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap();
        assert_eq!(outcome, FetchOutcome::Suppressed);
        assert!(backend.requested.is_empty());
        assert_eq!(feed.state(), &FeedState::Idle);
    }

    #[test]
    fn test_sequential_pages_accumulate_in_order() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);

        assert_eq!(feed.load_first(|p, s| backend.fetch(p, s)).unwrap(), 6);
        assert!(feed.has_next_page());
        assert_eq!(
            feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Fetched(6)
        );
        assert_eq!(
            feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Fetched(6)
        );
        assert!(!feed.has_next_page());

        // Last page reached: no further request
        assert_eq!(
            feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Exhausted
        );
        assert_eq!(backend.requested, vec![(0, 6), (1, 6), (2, 6)]);

        let ids: Vec<i64> = feed.items().map(|a| a.id).collect();
        assert_eq!(ids, (1..=18).collect::<Vec<_>>());
        assert_eq!(feed.len(), 18);
        assert_eq!(feed.pages_loaded(), 3);
    }

    #[test]
    fn test_single_last_page_is_exhausted() {
        let mut backend = Backend::new(1, 4);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();
        assert!(!feed.has_next_page());
        assert_eq!(
            feed.on_sentinel(true, |p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Exhausted
        );
        assert_eq!(backend.requested.len(), 1);
    }

    #[test]
    fn test_hidden_sentinel_does_not_fetch() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();

        assert_eq!(
            feed.on_sentinel(false, |p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Suppressed
        );
        assert_eq!(backend.requested.len(), 1);

        assert_eq!(
            feed.on_sentinel(true, |p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Fetched(6)
        );
        assert_eq!(backend.requested, vec![(0, 6), (1, 6)]);
    }

    #[test]
    fn test_fetch_more_while_next_page_in_flight_is_suppressed() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();

        assert_eq!(feed.begin_next(), Some(1));
        assert!(feed.is_fetching_next());
        assert!(feed.has_next_page());

        // A second sentinel report while page 1 is outstanding
        assert_eq!(
            feed.on_sentinel(true, |p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Suppressed
        );
        assert_eq!(feed.begin_next(), None);
        assert_eq!(backend.requested, vec![(0, 6)]);

        let page = backend.fetch(1, 6);
        assert_eq!(feed.complete_next(page).unwrap(), FetchOutcome::Fetched(6));
        assert!(!feed.is_fetching_next());
        assert_eq!(feed.begin_next(), Some(2));
    }

    #[test]
    fn test_fetch_more_during_first_load_is_suppressed() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);

        assert_eq!(feed.begin_first(), (0, 6));
        assert_eq!(feed.state(), &FeedState::LoadingFirst);
        assert_eq!(
            feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Suppressed
        );
        assert!(backend.requested.is_empty());

        let page = backend.fetch(0, 6);
        assert_eq!(feed.complete_first(page).unwrap(), 6);
        assert_eq!(feed.state(), &FeedState::Ready);
    }

    #[test]
    fn test_failed_next_page_clears_fetching_flag() {
        let mut backend = Backend::new(3, 6);
        backend.fail_on = Some(1);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();

        let next = feed.begin_next().unwrap();
        let page = backend.fetch(next, 6);
        assert!(feed.complete_next(page).is_err());
        assert!(!feed.is_fetching_next());
        assert!(matches!(feed.state(), FeedState::Failed(_)));
    }

    #[test]
    fn test_error_requires_reload() {
        let mut backend = Backend::new(3, 6);
        backend.fail_on = Some(1);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();

        let err = feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch articles");
        assert_eq!(
            feed.state(),
            &FeedState::Failed("Failed to fetch articles".to_string())
        );

        // No automatic retry from the failed state
        assert_eq!(
            feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap(),
            FetchOutcome::Suppressed
        );
        assert_eq!(backend.requested.len(), 2);

        backend.fail_on = None;
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();
        assert_eq!(feed.state(), &FeedState::Ready);
        assert_eq!(feed.len(), 6);
        assert_eq!(backend.requested.last(), Some(&(0, 6)));
    }

    #[test]
    fn test_first_page_failure() {
        let mut backend = Backend::new(3, 6);
        backend.fail_on = Some(0);
        let mut feed = Paginated::new(6);
        assert!(feed.load_first(|p, s| backend.fetch(p, s)).is_err());
        assert!(matches!(feed.state(), FeedState::Failed(_)));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_invalidate_restarts_from_first_page() {
        let mut backend = Backend::new(3, 6);
        let mut feed = Paginated::new(6);
        feed.load_first(|p, s| backend.fetch(p, s)).unwrap();
        feed.fetch_more(|p, s| backend.fetch(p, s)).unwrap();

        feed.invalidate();
        assert_eq!(feed.state(), &FeedState::Idle);
        assert!(feed.is_empty());
        assert_eq!(feed.total_elements(), None);
    }

    #[test]
    fn test_article_repository_scenario() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json(200, &article_page_json(0, 6, 6, 2))
            .respond_json(200, &article_page_json(1, 6, 3, 2));
        let repo = ApiArticleRepository::new(
            "http://localhost:8080/api",
            Locale::En,
            Box::new(transport.clone()),
        );

        let mut feed = Paginated::new(6);
        let first = feed.load_first(|p, s| repo.get_all(p, s)).unwrap();
        let outcome = feed.on_sentinel(true, |p, s| repo.get_all(p, s)).unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/api/articles?page=0&size=6",
                "http://localhost:8080/api/articles?page=1&size=6",
            ]
        );
        assert_eq!(outcome, FetchOutcome::Fetched(3));
        assert_eq!(feed.len(), first + 3);
        assert_eq!(feed.total_elements(), Some(9));
    }
}
