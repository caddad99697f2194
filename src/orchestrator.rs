//! Scan lifecycle
//!
//! `ScanOrchestrator` owns the state of one scan at a time and moves it
//! through `Idle → Scanning → Success | Failed`. Every transition is
//! published on a watch channel so a front end can re-render from the
//! latest state without polling.
//!
//! A scan in flight is represented by a [`ScanTicket`]. Dropping the ticket
//! before the scan settles (an abandoned `run` future, or a `begin` that is
//! never followed by `run`) puts the state back to what it was before the
//! scan started, so the trigger is never left disabled.

use crate::error::{ScanError, ScanResult};
use crate::models::{ScanRequest, ScanResponse, ScanService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle,
    /// Request in flight for this (trimmed) URL
    Scanning(String),
    Success(ScanResponse),
    /// Single-line, unsanitized failure message
    Failed(String),
}

impl ScanState {
    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning(_))
    }
}

/// Handle on the scan started by [`ScanOrchestrator::begin`].
#[derive(Debug)]
pub struct ScanTicket {
    request: ScanRequest,
    state: Arc<watch::Sender<ScanState>>,
    /// State to restore if the scan is abandoned; `None` once settled
    previous: Option<ScanState>,
}

impl ScanTicket {
    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    fn settle(&mut self, next: ScanState) {
        self.previous = None;
        self.state.send_replace(next);
    }
}

impl Drop for ScanTicket {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::debug!(url = %self.request.url, "scan abandoned before it settled");
            self.state.send_replace(previous);
        }
    }
}

pub struct ScanOrchestrator<S> {
    service: S,
    timeout: Duration,
    state: Arc<watch::Sender<ScanState>>,
}

impl<S: ScanService> ScanOrchestrator<S> {
    pub fn new(service: S, timeout: Duration) -> Self {
        let (state, _) = watch::channel(ScanState::Idle);
        Self {
            service,
            timeout,
            state: Arc::new(state),
        }
    }

    /// Receiver that sees every transition from now on
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ScanState {
        self.state.borrow().clone()
    }

    /// The scan trigger is disabled exactly while a ticket is outstanding
    pub fn is_trigger_enabled(&self) -> bool {
        !self.state.borrow().is_scanning()
    }

    /// Enter `Scanning` for `raw`, returning the ticket to hand to
    /// [`run`](Self::run).
    ///
    /// Blank input is a no-op. A request made while another ticket is
    /// outstanding is ignored.
    pub fn begin(&mut self, raw: &str) -> Option<ScanTicket> {
        if self.state.borrow().is_scanning() {
            tracing::debug!(input = raw, "scan already in flight, ignoring new request");
            return None;
        }

        let request = match ScanRequest::new(raw) {
            Ok(request) => request,
            Err(ScanError::EmptyInput) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "could not build scan request");
                return None;
            }
        };

        tracing::info!(url = %request.url, "scan started");
        let previous = self
            .state
            .send_replace(ScanState::Scanning(request.url.clone()));
        Some(ScanTicket {
            request,
            state: Arc::clone(&self.state),
            previous: Some(previous),
        })
    }

    /// Run one full scan of `raw` and return the resulting state.
    ///
    /// Returns the unchanged current state when the input is blank or a
    /// scan is already running.
    pub async fn scan(&mut self, raw: &str) -> ScanState {
        match self.begin(raw) {
            Some(ticket) => self.run(ticket).await,
            None => self.state(),
        }
    }

    /// Send the ticket's request and settle the scan with its outcome,
    /// bounded by the configured timeout. A ticket issued by another
    /// orchestrator is refused without contacting the service; dropping it
    /// abandons that orchestrator's scan.
    pub async fn run(&mut self, mut ticket: ScanTicket) -> ScanState {
        if !Arc::ptr_eq(&ticket.state, &self.state) {
            tracing::warn!(url = %ticket.request.url, "ticket belongs to another orchestrator");
            return self.state();
        }

        let outcome =
            match tokio::time::timeout(self.timeout, self.service.scan(&ticket.request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ScanError::Timeout(self.timeout)),
            };

        let next = match outcome {
            Ok(response) => {
                tracing::info!(
                    risk_score = response.verdict.risk_score,
                    reasons = response.verdict.reasons.len(),
                    "scan finished"
                );
                ScanState::Success(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "scan failed");
                ScanState::Failed(e.user_message())
            }
        };
        ticket.settle(next);
        self.state()
    }
}
