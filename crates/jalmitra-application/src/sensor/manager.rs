use super::snapshot::{DataStatus, SensorSnapshot};
use jalmitra_core::error::{JalmitraError, Result};
use jalmitra_core::sensor::{Alert, ManualReading, SensorDataSource, UsageSummary, WellReading};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// What happened to the result of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched data replaced the snapshot.
    Applied,
    /// The tracked well changed, or a newer refresh committed first; the result was dropped.
    Superseded,
    /// Nothing to do (the well was already tracked).
    Unchanged,
}

/// Identifies one in-flight refresh.
#[derive(Debug, Clone, Default)]
struct Ticket {
    well_id: String,
    epoch: u64,
    seq: u64,
}

type Fetched = (WellReading, Vec<Alert>, UsageSummary);

/// Owns the reading, usage summary and alert list for the tracked well.
///
/// Refreshes are tagged when issued and checked again when they complete:
/// a result is committed only if the tracked well has not changed since
/// (`epoch`) and no newer refresh has already committed (`applied`).
/// Both checks and the commit run inside the watch channel's write lock.
pub struct SensorDataManager {
    source: Arc<dyn SensorDataSource>,
    state: watch::Sender<SensorSnapshot>,
    epoch: AtomicU64,
    issued: AtomicU64,
    applied: AtomicU64,
    refresh_timeout: Option<Duration>,
}

impl SensorDataManager {
    /// Starts `Idle` with no data for `well_id`.
    ///
    /// # Arguments
    ///
    /// * `source` - Where readings, alerts and usage come from
    /// * `well_id` - The well to track until the first `retarget`
    pub fn new(source: Arc<dyn SensorDataSource>, well_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SensorSnapshot::new(well_id));
        Self {
            source,
            state,
            epoch: AtomicU64::new(0),
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            refresh_timeout: None,
        }
    }

    /// Fails refreshes that take longer than `timeout`. `None` waits indefinitely.
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SensorSnapshot> {
        self.state.subscribe()
    }

    pub fn well_id(&self) -> String {
        self.state.borrow().well_id.clone()
    }

    /// Starts tracking `well_id`. Returns false if it was already tracked.
    ///
    /// Refreshes issued for the previous well are superseded from here on.
    /// The held data stays visible until a refresh for the new well commits.
    ///
    /// # Arguments
    ///
    /// * `well_id` - The well to track from now on
    pub fn retarget(&self, well_id: &str) -> bool {
        let changed = self.state.send_if_modified(|snapshot| {
            if snapshot.well_id == well_id {
                return false;
            }
            snapshot.well_id = well_id.to_string();
            snapshot.status = DataStatus::Loading;
            self.epoch.fetch_add(1, Ordering::SeqCst);
            true
        });

        if changed {
            tracing::info!(well_id, "tracking well");
        }
        changed
    }

    /// `retarget` followed by a refresh for the new well.
    ///
    /// # Returns
    ///
    /// The outcome of the refresh, even when `well_id` was already tracked.
    pub async fn switch_well(&self, well_id: &str) -> Result<RefreshOutcome> {
        if !self.retarget(well_id) {
            return Ok(RefreshOutcome::Unchanged);
        }
        self.refresh().await
    }

    /// Fetches reading, alerts and usage for the tracked well and commits them together.
    ///
    /// On failure the status becomes `Failed` and the previous data stays;
    /// the error is `DataFetchFailed`. A result that was overtaken while in
    /// flight is dropped and reported as `Superseded`, whether it succeeded
    /// or not.
    ///
    /// # Returns
    ///
    /// `Applied` if this refresh's data is now visible, `Superseded` otherwise.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let ticket = self.issue();
        tracing::debug!(
            well_id = %ticket.well_id,
            epoch = ticket.epoch,
            seq = ticket.seq,
            "refresh started"
        );

        let fetched = self.fetch(&ticket.well_id).await;
        self.commit(&ticket, fetched)
    }

    fn issue(&self) -> Ticket {
        let mut ticket = Ticket::default();
        self.state.send_if_modified(|snapshot| {
            ticket = Ticket {
                well_id: snapshot.well_id.clone(),
                epoch: self.epoch.load(Ordering::SeqCst),
                seq: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
            };
            if snapshot.status == DataStatus::Loading {
                false
            } else {
                snapshot.status = DataStatus::Loading;
                true
            }
        });
        ticket
    }

    async fn fetch(&self, well_id: &str) -> Result<Fetched> {
        let all = async {
            tokio::try_join!(
                self.source.fetch_well_reading(well_id),
                self.source.fetch_alerts(well_id),
                self.source.fetch_usage_summary(),
            )
        };

        let fetched = match self.refresh_timeout {
            Some(limit) => match tokio::time::timeout(limit, all).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(JalmitraError::data_fetch_failed(format!(
                        "refresh timed out after {}ms",
                        limit.as_millis()
                    )));
                }
            },
            None => all.await,
        };

        fetched.map_err(|e| match e {
            JalmitraError::DataFetchFailed(_) => e,
            other => JalmitraError::data_fetch_failed(other.to_string()),
        })
    }

    fn commit(&self, ticket: &Ticket, fetched: Result<Fetched>) -> Result<RefreshOutcome> {
        let mut outcome = Ok(RefreshOutcome::Superseded);

        self.state.send_if_modified(|snapshot| {
            let current = snapshot.well_id == ticket.well_id
                && self.epoch.load(Ordering::SeqCst) == ticket.epoch
                && self.applied.load(Ordering::SeqCst) < ticket.seq;
            if !current {
                return false;
            }
            self.applied.store(ticket.seq, Ordering::SeqCst);

            // An older refresh landing first must not end the loading state of a newer one.
            let newest = self.issued.load(Ordering::SeqCst) == ticket.seq;

            match &fetched {
                Ok((reading, alerts, usage)) => {
                    snapshot.reading = Some(reading.clone());
                    snapshot.alerts = alerts.clone();
                    snapshot.usage = Some(usage.clone());
                    snapshot.status = if newest { DataStatus::Ready } else { DataStatus::Loading };
                    outcome = Ok(RefreshOutcome::Applied);
                }
                Err(err) => {
                    snapshot.status = if newest {
                        DataStatus::Failed(err.clone())
                    } else {
                        DataStatus::Loading
                    };
                    outcome = Err(err.clone());
                }
            }
            true
        });

        match &outcome {
            Ok(RefreshOutcome::Applied) => {
                tracing::info!(well_id = %ticket.well_id, seq = ticket.seq, "refresh applied")
            }
            Ok(_) => {
                tracing::debug!(well_id = %ticket.well_id, seq = ticket.seq, "refresh superseded")
            }
            Err(e) => tracing::warn!(well_id = %ticket.well_id, error = %e, "refresh failed"),
        }
        outcome
    }

    /// Marks the alert resolved in the held snapshot. Unknown ids are ignored.
    ///
    /// Returns whether anything changed. The next successful refresh replaces
    /// the alert list wholesale, including this flag.
    pub fn resolve_alert(&self, alert_id: &str) -> bool {
        let changed = self.state.send_if_modified(|snapshot| {
            snapshot
                .alerts
                .iter_mut()
                .find(|alert| alert.id == alert_id)
                .is_some_and(Alert::resolve)
        });

        if changed {
            tracing::info!(alert_id, "alert resolved");
        } else {
            tracing::debug!(alert_id, "resolve ignored");
        }
        changed
    }

    /// Sends a farmer-entered reading for the tracked well, then refreshes.
    ///
    /// # Arguments
    ///
    /// * `reading` - Values entered by hand; absent fields are left out
    ///
    /// # Returns
    ///
    /// `InvalidReading` for empty or out-of-range values, `NotFound` if the
    /// source does not know the tracked well, else the outcome of the
    /// follow-up refresh.
    pub async fn submit_manual_reading(&self, reading: ManualReading) -> Result<RefreshOutcome> {
        reading.validate()?;

        let well_id = self.well_id();
        if !self.source.submit_manual_reading(&well_id, &reading).await? {
            return Err(JalmitraError::not_found("well", well_id));
        }

        tracing::info!(%well_id, "manual reading accepted");
        self.refresh().await
    }
}
