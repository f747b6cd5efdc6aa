use ahash::RandomState;
use std::collections::HashSet;

use super::plan::{SortPlan, sort_by_consensus};
use crate::error::StoreError;
use crate::model::{Course, CourseId, GlobalFilter, RankedCourse, SortColumn, SortState};
use crate::store::RowStore;

pub const PAGE_SIZE: usize = 20;

/// One visitor's view of the rankings table.
#[derive(Debug, Clone)]
pub struct TableModel {
    pub sort: SortState,
    /// Rows handed to the view so far, a prefix of the fully sorted set.
    pub loaded: Vec<RankedCourse>,
    /// Every row, consensus-sorted. Only populated under a materialized plan.
    pub materialized: Option<Vec<RankedCourse>>,
    /// Index of the last page appended to `loaded`.
    pub page: usize,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub initial_load_complete: bool,
    /// View-state generation. Bumped whenever the sort changes; fetch results
    /// tagged with an older epoch are dropped.
    pub epoch: u64,
    pub expanded: HashSet<CourseId, RandomState>,
    pub filter: GlobalFilter,
    pub last_error: Option<StoreError>,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(SortState::default())
    }
}

impl TableModel {
    #[must_use]
    pub fn new(sort: SortState) -> Self {
        Self {
            sort,
            loaded: vec![],
            materialized: None,
            page: 0,
            has_more: true,
            loading: false,
            loading_more: false,
            initial_load_complete: false,
            epoch: 0,
            expanded: HashSet::default(),
            filter: GlobalFilter::default(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn plan(&self) -> SortPlan {
        SortPlan::for_sort(self.sort)
    }

    #[must_use]
    pub fn is_expanded(&self, id: CourseId) -> bool {
        self.expanded.contains(&id)
    }

    /// Loaded rows that pass the global filter, starting at `from`.
    pub fn visible_rows_from(&self, from: usize) -> impl Iterator<Item = &RankedCourse> {
        let start = from.min(self.loaded.len());
        self.filter.apply(&self.loaded[start..])
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &RankedCourse> {
        self.visible_rows_from(0)
    }

    #[must_use]
    pub fn find(&self, id: CourseId) -> Option<&RankedCourse> {
        self.loaded.iter().find(|r| r.id() == id)
    }

    fn begin_first_page(&mut self) -> Vec<Effect> {
        self.loading = true;
        self.loading_more = false;
        vec![Effect::FetchFirstPage {
            epoch: self.epoch,
            plan: self.plan(),
        }]
    }

    /// Clear the view for a new sort and fetch its first page.
    fn reset(&mut self) -> Vec<Effect> {
        self.epoch += 1;
        self.loaded.clear();
        self.materialized = None;
        self.page = 0;
        self.has_more = true;
        self.begin_first_page()
    }

    /// Serve the next window out of the materialized set.
    fn next_materialized_page(&mut self) {
        let Some(all) = self.materialized.as_ref() else {
            self.has_more = false;
            return;
        };
        let next = self.page + 1;
        let start = (next * PAGE_SIZE).min(all.len());
        let end = ((next + 1) * PAGE_SIZE).min(all.len());
        self.loaded.extend_from_slice(&all[start..end]);
        self.has_more = all.len() > end;
        self.page = next;
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    PageLoad,
    SortClicked(SortColumn),
    LoadMore,
    FirstPageLoaded {
        epoch: u64,
        plan: SortPlan,
        rows: Vec<Course>,
    },
    PageLoaded {
        epoch: u64,
        page: usize,
        rows: Vec<Course>,
    },
    FetchFailed {
        epoch: u64,
        error: StoreError,
    },
    ToggleRow(CourseId),
    FilterChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFirstPage { epoch: u64, plan: SortPlan },
    FetchPage { epoch: u64, plan: SortPlan, page: usize },
}

pub fn update(model: &mut TableModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::PageLoad => {
            if model.initial_load_complete || model.loading {
                vec![]
            } else {
                model.begin_first_page()
            }
        }
        Msg::SortClicked(column) => {
            model.sort.toggle(column);
            if model.initial_load_complete {
                model.reset()
            } else if model.loading {
                // initial fetch still out under the old sort; supersede it
                model.epoch += 1;
                model.begin_first_page()
            } else {
                vec![]
            }
        }
        Msg::LoadMore => {
            if !model.initial_load_complete
                || model.loading
                || model.loading_more
                || !model.has_more
            {
                return vec![];
            }
            if model.loaded.is_empty() && model.materialized.is_none() {
                // first page of this sort never arrived; fetch it again
                return model.begin_first_page();
            }
            match model.plan() {
                SortPlan::Materialize(_) => {
                    model.next_materialized_page();
                    vec![]
                }
                plan @ SortPlan::Pushdown(_) => {
                    model.loading_more = true;
                    vec![Effect::FetchPage {
                        epoch: model.epoch,
                        plan,
                        page: model.page + 1,
                    }]
                }
            }
        }
        Msg::FirstPageLoaded { epoch, plan, rows } => {
            if epoch != model.epoch {
                log::debug!("dropping first page from stale epoch {epoch} (now {})", model.epoch);
                return vec![];
            }
            let mut ranked: Vec<RankedCourse> = rows.into_iter().map(RankedCourse::from).collect();
            match plan {
                SortPlan::Materialize(direction) => {
                    sort_by_consensus(&mut ranked, direction);
                    model.loaded = ranked.iter().take(PAGE_SIZE).cloned().collect();
                    model.has_more = ranked.len() > PAGE_SIZE;
                    model.materialized = Some(ranked);
                }
                SortPlan::Pushdown(_) => {
                    model.has_more = ranked.len() == PAGE_SIZE;
                    model.loaded = ranked;
                    model.materialized = None;
                }
            }
            model.page = 0;
            model.loading = false;
            model.initial_load_complete = true;
            model.last_error = None;
            vec![]
        }
        Msg::PageLoaded { epoch, page, rows } => {
            if epoch != model.epoch {
                log::debug!("dropping page {page} from stale epoch {epoch} (now {})", model.epoch);
                return vec![];
            }
            model.has_more = rows.len() == PAGE_SIZE;
            model.loaded.extend(rows.into_iter().map(RankedCourse::from));
            model.page = page;
            model.loading_more = false;
            vec![]
        }
        Msg::FetchFailed { epoch, error } => {
            if epoch != model.epoch {
                log::debug!("ignoring failure from stale epoch {epoch}: {error}");
                return vec![];
            }
            log::error!("Failed to fetch courses: {error}");
            if model.loading {
                model.loading = false;
                model.initial_load_complete = true;
            }
            model.loading_more = false;
            model.last_error = Some(error);
            vec![]
        }
        Msg::ToggleRow(id) => {
            if model.find(id).is_none() {
                return vec![];
            }
            if !model.expanded.remove(&id) {
                model.expanded.insert(id);
            }
            vec![]
        }
        Msg::FilterChanged(query) => {
            model.filter = GlobalFilter::new(&query);
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub store: &'a dyn RowStore,
}

pub async fn run_effect(effect: Effect, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::FetchFirstPage { epoch, plan } => {
            match deps.store.query(&plan.query(0, PAGE_SIZE)).await {
                Ok(rows) => Msg::FirstPageLoaded { epoch, plan, rows },
                Err(error) => Msg::FetchFailed { epoch, error },
            }
        }
        Effect::FetchPage { epoch, plan, page } => {
            match deps.store.query(&plan.query(page, PAGE_SIZE)).await {
                Ok(rows) => Msg::PageLoaded { epoch, page, rows },
                Err(error) => Msg::FetchFailed { epoch, error },
            }
        }
    }
}
