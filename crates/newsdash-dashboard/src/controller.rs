//! Report state controller.
//!
//! Every command returns the resulting [`ViewState`] or a typed error. Each
//! network command takes a sequence number when it starts; a response is
//! applied only if no newer command started since, otherwise it is dropped
//! with [`ControllerError::Superseded`].
//!
//! Concurrency rules:
//! - an analysis trigger is refused while anything is in flight;
//! - reads are refused while an analysis is in flight;
//! - reads may overlap each other, and the newest one wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use newsdash_core::{AnalysisPeriod, CompanyId, PeriodSelector};

use crate::api::DashboardApi;
use crate::error::{ApiError, ControllerError};
use crate::view_state::{ViewMode, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Read,
    Analysis,
}

#[derive(Debug, Default)]
struct Inner {
    view: ViewState,
    selector: PeriodSelector,
    latest_seq: u64,
    pending: usize,
    analysis_running: bool,
}

pub struct ReportController {
    api: Arc<dyn DashboardApi>,
    company: CompanyId,
    inner: Mutex<Inner>,
}

impl ReportController {
    pub fn new(api: Arc<dyn DashboardApi>, company: CompanyId) -> Self {
        Self {
            api,
            company,
            inner: Mutex::new(Inner::default()),
        }
    }

    #[must_use]
    pub fn company(&self) -> &CompanyId {
        &self.company
    }

    /// Current state without issuing any request.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Loads the live snapshot and switches to live mode.
    ///
    /// # Errors
    ///
    /// [`ControllerError::Busy`] while an analysis runs,
    /// [`ControllerError::Superseded`] if a newer command started meanwhile,
    /// [`ControllerError::LoginRequired`] when the session is rejected, or
    /// [`ControllerError::Request`] for any other failure (the previous
    /// snapshot stays on screen).
    pub async fn load_live(&self) -> Result<ViewState, ControllerError> {
        let seq = self.begin(OpKind::Read, "load_live")?;
        self.reload_live(seq).await
    }

    /// Loads the snapshot captured at `timestamp` and switches to historical
    /// mode. On failure the current view is left untouched apart from the
    /// error message.
    ///
    /// # Errors
    ///
    /// Same as [`ReportController::load_live`].
    pub async fn load_historical(&self, timestamp: &str) -> Result<ViewState, ControllerError> {
        let seq = self.begin(OpKind::Read, "load_historical")?;
        let result = self.api.fetch_report(&self.company, timestamp).await;
        self.finish(seq, OpKind::Read, result, |view, snapshot| {
            view.mode = ViewMode::Historical;
            view.selected_timestamp = Some(timestamp.to_string());
            view.snapshot = Some(Arc::new(snapshot));
        })
    }

    /// Leaves historical mode and reloads the live snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`ReportController::load_live`].
    pub async fn return_to_live(&self) -> Result<ViewState, ControllerError> {
        {
            let mut inner = self.lock();
            if inner.analysis_running {
                tracing::info!(company = %self.company, "return_to_live rejected: analysis in flight");
                return Err(ControllerError::Busy);
            }
            inner.view.mode = ViewMode::Live;
            inner.view.selected_timestamp = None;
        }
        self.load_live().await
    }

    /// Submits a new analysis for `period`, then reloads the live snapshot.
    ///
    /// Never queued: refused with [`ControllerError::Busy`] while any command
    /// is in flight. On failure neither the period nor the mode changes.
    ///
    /// # Errors
    ///
    /// See [`ReportController::load_live`]; errors from the follow-up reload
    /// are returned as-is.
    pub async fn trigger_analysis(
        &self,
        period: AnalysisPeriod,
    ) -> Result<ViewState, ControllerError> {
        let seq = self.begin(OpKind::Analysis, "trigger_analysis")?;
        let result = self.api.trigger_analysis(&self.company, period).await;

        // The reload is reserved under the same lock that releases the
        // analysis, so no other trigger can slip in between.
        let reload_seq = {
            let mut inner = self.lock();
            self.settle(&mut inner, seq, OpKind::Analysis, result, |view, ()| {
                view.period_picker_open = false;
            })?;
            inner.selector.select(period);
            inner.view.period = period;
            Self::reserve(&mut inner, OpKind::Read)
        };
        self.reload_live(reload_seq).await
    }

    /// Changes the pending period selection. The displayed snapshot is not
    /// touched.
    ///
    /// # Errors
    ///
    /// [`ControllerError::InvalidPeriod`] for anything outside
    /// today/week/month/year; the previous selection is kept.
    pub fn select_period(&self, raw: &str) -> Result<ViewState, ControllerError> {
        let mut inner = self.lock();
        let period = inner.selector.select_str(raw)?;
        inner.view.period = period;
        Ok(inner.view.clone())
    }

    pub fn toggle_period_picker(&self) -> ViewState {
        let mut inner = self.lock();
        inner.view.period_picker_open = !inner.view.period_picker_open;
        inner.view.clone()
    }

    pub fn close_period_picker(&self) -> ViewState {
        let mut inner = self.lock();
        inner.view.period_picker_open = false;
        inner.view.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, kind: OpKind, op: &'static str) -> Result<u64, ControllerError> {
        let mut inner = self.lock();
        let busy = match kind {
            OpKind::Analysis => inner.pending > 0,
            OpKind::Read => inner.analysis_running,
        };
        if busy {
            tracing::info!(company = %self.company, op, "command rejected: operation in flight");
            return Err(ControllerError::Busy);
        }
        Ok(Self::reserve(&mut inner, kind))
    }

    /// Takes the next sequence number and marks the operation in flight.
    fn reserve(inner: &mut Inner, kind: OpKind) -> u64 {
        inner.latest_seq += 1;
        inner.pending += 1;
        if kind == OpKind::Analysis {
            inner.analysis_running = true;
        }
        inner.view.is_fetching = true;
        inner.latest_seq
    }

    async fn reload_live(&self, seq: u64) -> Result<ViewState, ControllerError> {
        let result = self.api.fetch_live().await;
        self.finish(seq, OpKind::Read, result, |view, snapshot| {
            view.mode = ViewMode::Live;
            view.selected_timestamp = None;
            view.snapshot = Some(Arc::new(snapshot));
        })
    }

    fn finish<T>(
        &self,
        seq: u64,
        kind: OpKind,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut ViewState, T),
    ) -> Result<ViewState, ControllerError> {
        let mut inner = self.lock();
        self.settle(&mut inner, seq, kind, result, apply)
    }

    fn settle<T>(
        &self,
        inner: &mut Inner,
        seq: u64,
        kind: OpKind,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut ViewState, T),
    ) -> Result<ViewState, ControllerError> {
        inner.pending = inner.pending.saturating_sub(1);
        if kind == OpKind::Analysis {
            inner.analysis_running = false;
        }
        inner.view.is_fetching = inner.pending > 0;

        if seq != inner.latest_seq {
            tracing::debug!(
                company = %self.company,
                seq,
                latest = inner.latest_seq,
                "discarding stale response"
            );
            return Err(ControllerError::Superseded);
        }

        match result {
            Ok(value) => {
                inner.view.error = None;
                inner.view.login_required = false;
                apply(&mut inner.view, value);
                Ok(inner.view.clone())
            }
            Err(err) if err.is_login_required() => {
                tracing::warn!(company = %self.company, error = %err, "session rejected; login required");
                inner.view.login_required = true;
                Err(ControllerError::LoginRequired)
            }
            Err(err) => {
                tracing::warn!(company = %self.company, kind = %err.kind, error = %err, "dashboard request failed");
                inner.view.error = Some(err.message.clone());
                Err(ControllerError::Request(err))
            }
        }
    }
}
