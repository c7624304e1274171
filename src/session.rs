//! Request sessions: latest-wins result handling and input debouncing

use crate::error::Result;
use crate::provider::{DataRequest, HistoricalDataProvider};
use seasonal_forecast::{
    Location, OutlookConfig, OutlookReport, ReferencePeriod, SeasonalForecaster, TargetDate,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Identifies one forecast request within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Runs forecast requests against a provider.
///
/// Every request takes a ticket from a monotonic counter. Only the holder of
/// the newest ticket gets results; a superseded request returns `Ok(None)`.
#[derive(Debug)]
pub struct OutlookSession<P: HistoricalDataProvider> {
    provider: P,
    forecaster: SeasonalForecaster,
    config: OutlookConfig,
    generation: AtomicU64,
}

impl<P: HistoricalDataProvider> OutlookSession<P> {
    pub fn new(provider: P, config: OutlookConfig) -> Result<Self> {
        let forecaster = SeasonalForecaster::from_config(&config)?;
        Ok(Self {
            provider,
            forecaster,
            config,
            generation: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &OutlookConfig {
        &self.config
    }

    pub fn forecaster(&self) -> &SeasonalForecaster {
        &self.forecaster
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Start a new request, superseding any in flight
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest request
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Fetch and forecast as a new request
    pub fn run(
        &self,
        location: Location,
        target: TargetDate,
        current_year: i32,
    ) -> Result<Option<OutlookReport>> {
        let ticket = self.begin();
        self.run_ticket(ticket, location, target, current_year)
    }

    /// Fetch and forecast under an already issued ticket
    pub fn run_ticket(
        &self,
        ticket: RequestTicket,
        location: Location,
        target: TargetDate,
        current_year: i32,
    ) -> Result<Option<OutlookReport>> {
        let period = ReferencePeriod::preceding(current_year, self.config.reference_years)?;
        let request = DataRequest::new(location, period, &self.config.catalog);

        debug!(
            generation = ticket.generation(),
            start = %request.start_date(),
            end = %request.end_date(),
            "Fetching historical data"
        );

        if !self.is_current(ticket) {
            info!(generation = ticket.generation(), "Request superseded before fetch");
            return Ok(None);
        }

        let series = self.provider.fetch(&request)?;

        if !self.is_current(ticket) {
            info!(generation = ticket.generation(), "Discarding stale fetch");
            return Ok(None);
        }

        let report = self.forecaster.forecast(&series, &target)?;

        if !self.is_current(ticket) {
            info!(generation = ticket.generation(), "Discarding stale forecast");
            return Ok(None);
        }

        Ok(Some(report))
    }
}

/// Coalesces bursts of input changes into one recomputation.
///
/// Recompute fires at most once per settle period after the last change.
#[derive(Debug, Clone)]
pub struct Debouncer {
    settle: Duration,
    last_change: Option<Instant>,
}

impl Debouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            last_change: None,
        }
    }

    /// Record an input change at `now`
    pub fn touch(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// A change is waiting to be acted on
    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// The pending change has been quiet for the settle period
    pub fn is_settled(&self, now: Instant) -> bool {
        self.last_change
            .map(|changed| now.saturating_duration_since(changed) >= self.settle)
            .unwrap_or(false)
    }

    /// Consume the pending change if it has settled
    pub fn take_ready(&mut self, now: Instant) -> bool {
        if self.is_settled(now) {
            self.last_change = None;
            true
        } else {
            false
        }
    }

    /// Drop any pending change
    pub fn cancel(&mut self) {
        self.last_change = None;
    }
}
