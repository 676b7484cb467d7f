//! Two-phase load/select engine shared by the dashboard pages.
//!
//! A view processor owns the state behind one page:
//!
//! 1. **Activation** reads the page's collection, builds the date index,
//!    selects the most recent day and renders it.
//! 2. **Selection** re-renders for a newly chosen day, either from the
//!    activation cache or from a fresh read, depending on the view.
//!
//! Every load takes a [`RequestToken`]; a result is stored only while its
//! token is still the latest, so a slow response can never overwrite a newer
//! one. The caller of a superseded selection still receives the page for
//! the day it asked for.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{DateKey, DateSelection, ViewName};
use crate::db::repository::DocumentRepository;
use crate::db::services as db_services;
use crate::models::RawDocument;
use crate::services::date_index::{index_dates, DateIndex};
use crate::services::sequencer::{RequestSequencer, RequestToken};

/// Prompt shown when a view needs a concrete day.
pub const SELECT_DATE_PROMPT: &str = "Please select a date";

/// Renderer-facing status of a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewStatus<T> {
    Loading,
    Ready { data: T },
    Empty { message: String },
    Prompt { message: String },
    Error { message: String },
}

impl<T> ViewStatus<T> {
    pub fn empty(message: impl Into<String>) -> Self {
        ViewStatus::Empty {
            message: message.into(),
        }
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        ViewStatus::Prompt {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ViewStatus::Error {
            message: message.into(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewStatus::Ready { data } => Some(data),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready { .. })
    }
}

/// Everything a page needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot<T> {
    pub view: ViewName,
    /// Date selector options, most recent first.
    pub dates: Vec<DateKey>,
    pub selected_date: Option<DateSelection>,
    pub status: ViewStatus<T>,
}

/// What a particular page reads, caches and renders.
pub trait ViewKind: Send + Sync + 'static {
    /// Derived data kept between selections.
    type Cache: Send + Sync;
    /// Payload of a ready page.
    type Output: Clone + Serialize + Send + Sync;

    fn name(&self) -> ViewName;

    /// Store collection backing the page.
    fn collection(&self) -> &'static str;

    /// Prefix of the message shown when the read fails.
    fn fetch_error(&self) -> &'static str;

    /// Whether the "All Dates" selector value is meaningful for this page.
    fn allows_all_dates(&self) -> bool {
        false
    }

    /// Whether a new selection reads the collection again.
    fn refetch_on_select(&self) -> bool {
        false
    }

    fn build_cache(&self, documents: &[RawDocument]) -> Self::Cache;

    fn render(&self, cache: &Self::Cache, selection: &DateSelection) -> ViewStatus<Self::Output>;

    /// Status when the collection has no documents at all.
    fn no_dates(&self) -> ViewStatus<Self::Output> {
        ViewStatus::empty("No data available")
    }

    /// Status when a concrete day is required but none is selected.
    fn prompt(&self) -> ViewStatus<Self::Output> {
        ViewStatus::prompt(SELECT_DATE_PROMPT)
    }
}

struct ViewState<K: ViewKind> {
    activated: bool,
    index: DateIndex,
    selection: Option<DateSelection>,
    cache: Option<K::Cache>,
    status: ViewStatus<K::Output>,
}

impl<K: ViewKind> Default for ViewState<K> {
    fn default() -> Self {
        Self {
            activated: false,
            index: DateIndex::default(),
            selection: None,
            cache: None,
            status: ViewStatus::Loading,
        }
    }
}

/// Stateful processor behind one dashboard page.
pub struct ViewProcessor<K: ViewKind> {
    kind: K,
    repository: Arc<dyn DocumentRepository>,
    sequencer: RequestSequencer,
    state: RwLock<ViewState<K>>,
}

impl<K: ViewKind> ViewProcessor<K> {
    pub fn new(kind: K, repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            kind,
            repository,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(ViewState::default()),
        }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn is_activated(&self) -> bool {
        self.state.read().activated
    }

    /// Current date index, empty before activation.
    pub fn date_index(&self) -> DateIndex {
        self.state.read().index.clone()
    }

    /// Read the collection, index its days and render the most recent one.
    ///
    /// Like [`select_date`](Self::select_date), the returned snapshot is this
    /// load's result even when a newer request has since taken over.
    pub async fn activate(&self) -> ViewSnapshot<K::Output> {
        let token = self.sequencer.issue();
        self.apply(token, |state| state.status = ViewStatus::Loading);
        log::info!("Activating {} view", self.kind.name());

        let (index, selection, cache, status) = match self.fetch().await {
            Ok(documents) => {
                let index = index_dates(&documents);
                let cache = self.kind.build_cache(&documents);
                let selection = index.default.clone().map(DateSelection::Date);
                let status = match &selection {
                    Some(selection) => self.render(&cache, selection),
                    None => self.kind.no_dates(),
                };
                (index, selection, Some(cache), status)
            }
            Err(message) => (DateIndex::default(), None, None, ViewStatus::error(message)),
        };

        let answer = ViewSnapshot {
            view: self.kind.name(),
            dates: index.all.clone(),
            selected_date: selection.clone(),
            status: status.clone(),
        };

        self.apply(token, |state| {
            state.activated = true;
            state.index = index;
            state.selection = selection;
            state.cache = cache;
            state.status = status;
        });

        answer
    }

    /// Activate the view unless it already has been.
    pub async fn ensure_activated(&self) {
        let activated = self.is_activated();
        if !activated {
            self.activate().await;
        }
    }

    /// Read the collection again and reset to the most recent day.
    pub async fn reload(&self) -> ViewSnapshot<K::Output> {
        self.activate().await
    }

    /// Render the page for `selection`, replacing whatever was shown before.
    ///
    /// The returned snapshot always answers `selection`. If a newer request
    /// was issued while this one was loading, the stored state is left to
    /// the newer request and only the caller sees this result.
    pub async fn select_date(&self, selection: DateSelection) -> ViewSnapshot<K::Output> {
        self.ensure_activated().await;
        let token = self.sequencer.issue();

        let (status, cache) = if selection.is_all() && !self.kind.allows_all_dates() {
            (self.kind.prompt(), None)
        } else if self.kind.refetch_on_select() {
            self.apply(token, |state| {
                state.selection = Some(selection.clone());
                state.status = ViewStatus::Loading;
            });
            match self.fetch().await {
                Ok(documents) => {
                    let cache = self.kind.build_cache(&documents);
                    (self.render(&cache, &selection), Some(cache))
                }
                Err(message) => (ViewStatus::error(message), None),
            }
        } else {
            let state = self.state.read();
            let status = match &state.cache {
                Some(cache) => self.render(cache, &selection),
                None => state.status.clone(),
            };
            (status, None)
        };

        let answer = ViewSnapshot {
            view: self.kind.name(),
            dates: self.state.read().index.all.clone(),
            selected_date: Some(selection.clone()),
            status: status.clone(),
        };

        self.apply(token, |state| {
            state.selection = Some(selection);
            state.status = status;
            if let Some(cache) = cache {
                state.cache = Some(cache);
            }
        });

        answer
    }

    /// Copy of what the page currently shows.
    pub fn snapshot(&self) -> ViewSnapshot<K::Output> {
        let state = self.state.read();
        ViewSnapshot {
            view: self.kind.name(),
            dates: state.index.all.clone(),
            selected_date: state.selection.clone(),
            status: state.status.clone(),
        }
    }

    fn render(&self, cache: &K::Cache, selection: &DateSelection) -> ViewStatus<K::Output> {
        if selection.is_all() && !self.kind.allows_all_dates() {
            return self.kind.prompt();
        }
        self.kind.render(cache, selection)
    }

    async fn fetch(&self) -> Result<Vec<RawDocument>, String> {
        db_services::fetch_collection(self.repository.as_ref(), self.kind.collection())
            .await
            .map_err(|e| format!("{}: {}", self.kind.fetch_error(), e))
    }

    /// Run `update` if `token` is still the latest; report whether it ran.
    fn apply(&self, token: RequestToken, update: impl FnOnce(&mut ViewState<K>)) -> bool {
        let mut state = self.state.write();
        if self.sequencer.is_current(token) {
            update(&mut state);
            true
        } else {
            log::debug!(
                "Not storing superseded {} result (token {})",
                self.kind.name(),
                token.value()
            );
            false
        }
    }
}
