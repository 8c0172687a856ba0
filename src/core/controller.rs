use crate::core::listing::ListViewModel;
use crate::domain::model::ListQuery;
use crate::domain::ports::{ConfigProvider, SchoolSource};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Owns the list view state and turns filter changes into debounced fetches.
///
/// Every fetch is tagged with a sequence number. After the debounce delay a
/// fetch that is no longer the latest is dropped without hitting the source,
/// and a response is applied only while its number is still the latest, so a
/// slow early response can never overwrite a newer one.
pub struct ListController<S: SchoolSource + 'static> {
    source: Arc<S>,
    state: Arc<Mutex<ListViewModel>>,
    latest: Arc<AtomicU64>,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
    debounce: Duration,
    limit: usize,
}

impl<S: SchoolSource + 'static> ListController<S> {
    pub fn new(source: S, debounce: Duration, limit: usize) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(ListViewModel::new())),
            latest: Arc::new(AtomicU64::new(0)),
            tasks: std::sync::Mutex::new(Vec::new()),
            debounce,
            limit,
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self::new(source, config.debounce(), config.request_limit())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sequence number of the most recently scheduled fetch.
    pub fn latest_request(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> ListViewModel {
        self.state.lock().await.clone()
    }

    pub async fn with_state<R>(&self, f: impl FnOnce(&ListViewModel) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Loads the collection for the current filter.
    pub async fn refresh(&self) -> u64 {
        self.change_filter(|_| Ok(())).await.unwrap_or_default()
    }

    pub async fn set_search(&self, term: &str) -> u64 {
        self.change_filter(|state| {
            state.set_search(term);
            Ok(())
        })
        .await
        .unwrap_or_default()
    }

    pub async fn set_letter(&self, letter: char) -> Result<u64> {
        self.change_filter(|state| state.set_letter(letter)).await
    }

    pub async fn clear_filter(&self) -> u64 {
        self.change_filter(|state| {
            state.clear_filter();
            Ok(())
        })
        .await
        .unwrap_or_default()
    }

    pub async fn go_to_page(&self, page: usize) -> usize {
        self.state.lock().await.go_to_page(page)
    }

    pub async fn next_page(&self) -> usize {
        self.state.lock().await.next_page()
    }

    pub async fn previous_page(&self) -> usize {
        self.state.lock().await.previous_page()
    }

    /// Waits until every scheduled fetch has finished or been dropped.
    pub async fn settle(&self) {
        loop {
            let handles = {
                let mut tasks = self.tasks.lock().unwrap_or_else(|p| p.into_inner());
                std::mem::take(&mut *tasks)
            };
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!("List fetch task ended abnormally: {}", e);
                }
            }
        }
    }

    async fn change_filter<F>(&self, change: F) -> Result<u64>
    where
        F: FnOnce(&mut ListViewModel) -> Result<()>,
    {
        let mut state = self.state.lock().await;
        change(&mut *state)?;
        state.begin_loading();
        let query = state.query(self.limit);
        // Bumped under the state lock so no older response can slip in
        // between the filter change and the new number.
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        drop(state);

        self.spawn_fetch(seq, query);
        Ok(seq)
    }

    fn spawn_fetch(&self, seq: u64, query: ListQuery) {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != seq {
                tracing::debug!("Request #{} superseded before sending", seq);
                return;
            }

            tracing::debug!("Request #{}: fetching schools with {:?}", seq, query);
            let result = source.list_schools(&query).await;

            let mut state = state.lock().await;
            if latest.load(Ordering::SeqCst) != seq {
                tracing::debug!("Discarding stale response for request #{}", seq);
                return;
            }

            match result {
                Ok(schools) => {
                    tracing::info!("Loaded {} institutions", schools.len());
                    state.apply_results(schools);
                }
                Err(e) if e.is_fetch_failure() => {
                    tracing::warn!("Failed to load schools: {}", e);
                    state.clear_results();
                }
                Err(e) => {
                    tracing::error!("Cannot build school list request: {}", e);
                    state.clear_results();
                }
            }
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(|p| p.into_inner());
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }
}
