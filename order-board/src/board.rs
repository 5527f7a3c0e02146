//! Order board service
//!
//! Periodically pulls orders and tables from an [`OrderSource`], rebuilds the
//! statistics and table cards from scratch, and publishes the result as an
//! immutable [`BoardSnapshot`]. Readers always get a whole snapshot; a refresh
//! never patches the previous one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use shared::{DiningTable, GetOrdersQuery, GuestId, Order};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::checkout::GuestCheckout;
use crate::error::{BoardError, BoardResult};
use crate::source::OrderSource;
use crate::stats::{OrderStatistics, aggregate};
use crate::table_card::{TableCard, table_cards};

/// Longest look-back accepted for [`TimeWindow::LastHours`]
pub const MAX_WINDOW_HOURS: i64 = 24 * 366;

/// Which orders a refresh asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// The current calendar day in the board's local time zone
    Today,
    /// The last `n` hours until now, clamped to `0..=MAX_WINDOW_HOURS`
    LastHours(i64),
    /// Fixed bounds
    Range {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl TimeWindow {
    /// Resolve against the machine's local time zone
    pub fn resolve(&self, now: DateTime<Utc>) -> GetOrdersQuery {
        self.resolve_in(now, &Local)
    }

    /// Resolve with `Today` meaning the calendar day of `now` in `tz`
    pub fn resolve_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> GetOrdersQuery {
        match *self {
            TimeWindow::Today => {
                let day = now.with_timezone(tz).date_naive();
                GetOrdersQuery {
                    from_date: day.and_hms_opt(0, 0, 0).and_then(|t| local_to_utc(tz, t)),
                    to_date: day
                        .and_hms_milli_opt(23, 59, 59, 999)
                        .and_then(|t| local_to_utc(tz, t)),
                }
            }
            TimeWindow::LastHours(hours) => {
                let hours = hours.clamp(0, MAX_WINDOW_HOURS);
                GetOrdersQuery {
                    from_date: TimeDelta::try_hours(hours).and_then(|d| now.checked_sub_signed(d)),
                    to_date: Some(now),
                }
            }
            TimeWindow::Range { from, to } => GetOrdersQuery::between(from, to),
        }
    }
}

/// Local wall-clock time to UTC, skipping forward past a DST gap
fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + TimeDelta::hours(1))).earliest())
        .map(|t| t.with_timezone(&Utc))
}

/// Everything derived from one refresh
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    /// Refresh sequence number; higher is newer
    pub generation: u64,
    pub query: GetOrdersQuery,
    pub orders: Vec<Order>,
    pub tables: Vec<DiningTable>,
    pub statistics: OrderStatistics,
    pub cards: Vec<TableCard>,
    pub refreshed_at: DateTime<Utc>,
}

impl BoardSnapshot {
    /// Build a snapshot from already-fetched data
    pub fn build(
        generation: u64,
        query: GetOrdersQuery,
        orders: Vec<Order>,
        tables: Vec<DiningTable>,
    ) -> Self {
        let statistics = aggregate(&orders);
        let cards = table_cards(&tables, &statistics);
        Self {
            generation,
            query,
            orders,
            tables,
            statistics,
            cards,
            refreshed_at: Utc::now(),
        }
    }

    pub fn checkout(&self, guest_id: GuestId) -> GuestCheckout {
        GuestCheckout::from_statistics(&self.statistics, guest_id)
    }
}

pub struct OrderBoard {
    source: Arc<dyn OrderSource>,
    window: TimeWindow,
    generation: AtomicU64,
    latest: RwLock<Option<Arc<BoardSnapshot>>>,
}

impl OrderBoard {
    pub fn new(source: Arc<dyn OrderSource>, window: TimeWindow) -> Self {
        Self {
            source,
            window,
            generation: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Latest published snapshot, `None` before the first successful refresh
    pub fn snapshot(&self) -> Option<Arc<BoardSnapshot>> {
        self.latest.read().clone()
    }

    /// Fetch, aggregate and publish a new snapshot
    ///
    /// On failure the previously published snapshot stays in place. Refreshes
    /// may overlap; a refresh that started before the published snapshot's
    /// refresh is discarded and the newer snapshot is returned instead.
    pub async fn refresh(&self) -> BoardResult<Arc<BoardSnapshot>> {
        let started = Instant::now();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.window.resolve(Utc::now());

        let (orders, tables) =
            tokio::try_join!(self.source.fetch_orders(&query), self.source.list_tables())
                .inspect_err(|e| tracing::error!(error = %e, "Board refresh failed"))?;

        let snapshot = Arc::new(BoardSnapshot::build(generation, query, orders, tables));
        {
            let mut latest = self.latest.write();
            if let Some(current) = latest.as_ref().filter(|c| c.generation > generation) {
                tracing::debug!(
                    stale = generation,
                    current = current.generation,
                    "Discarding stale refresh"
                );
                return Ok(current.clone());
            }
            *latest = Some(snapshot.clone());
        }

        tracing::info!(
            orders = snapshot.orders.len(),
            tables = snapshot.tables.len(),
            serving_tables = snapshot.statistics.serving_guests.len(),
            open_orders = snapshot.statistics.status.serving(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Board refreshed"
        );
        for card in &snapshot.cards {
            tracing::debug!(
                table = card.table_number,
                pending = card.counts.pending,
                processing = card.counts.processing,
                delivered = card.counts.delivered,
                serving_guests = card.serving_guest_count,
                "Table card"
            );
        }

        Ok(snapshot)
    }

    /// Checkout view for a guest from the latest snapshot
    pub fn checkout(&self, guest_id: GuestId) -> GuestCheckout {
        match self.snapshot() {
            Some(snapshot) => snapshot.checkout(guest_id),
            None => GuestCheckout::new(guest_id, &[]),
        }
    }

    /// Pay every open order of a guest, then refresh
    ///
    /// Refused when the latest snapshot shows nothing payable for the guest.
    /// A failed follow-up refresh does not undo or fail the payment.
    pub async fn pay_guest(&self, guest_id: GuestId) -> BoardResult<Vec<Order>> {
        if !self.checkout(guest_id).can_pay() {
            return Err(BoardError::NothingToPay { guest_id });
        }

        let paid = self.source.pay_guest_orders(guest_id).await?;
        tracing::info!(guest_id, paid = paid.len(), "Guest orders paid");

        if let Err(e) = self.refresh().await {
            tracing::warn!(guest_id, error = %e, "Refresh after payment failed");
        }

        Ok(paid)
    }

    /// Refresh every `period` until `cancel` fires
    pub async fn run(&self, period: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(period_secs = period.as_secs(), window = ?self.window, "Board refresh loop started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Board refresh loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    // Errors are logged by refresh; try again next tick
                    let _ = self.refresh().await;
                }
            }
        }
    }
}
