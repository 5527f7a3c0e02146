//! Board refresh / pay flows against the in-memory source

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{order, service_day, table};
use order_board::{
    BoardError, BoardResult, InMemoryOrderSource, OrderBoard, OrderSource, aggregate,
};
use shared::{DiningTable, GetOrdersQuery, GuestId, Order, OrderStatus::*};
use tokio::sync::{Notify, Semaphore};
use tokio_util::sync::CancellationToken;

fn dinner_service() -> InMemoryOrderSource {
    InMemoryOrderSource::new(
        vec![
            order(1, Pending, Some(1), Some(10)),
            order(2, Paid, Some(1), Some(10)),
            order(3, Delivered, Some(2), Some(20)),
            order(4, Rejected, Some(3), Some(30)),
            order(5, Processing, None, None),
        ],
        vec![table(1), table(2), table(3), table(4)],
    )
}

/// Source that can be switched to fail every call
struct FlakySource {
    inner: InMemoryOrderSource,
    failing: AtomicBool,
}

#[async_trait]
impl OrderSource for FlakySource {
    async fn fetch_orders(&self, query: &GetOrdersQuery) -> BoardResult<Vec<Order>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BoardError::Internal("upstream down".into()));
        }
        self.inner.fetch_orders(query).await
    }

    async fn list_tables(&self) -> BoardResult<Vec<DiningTable>> {
        self.inner.list_tables().await
    }

    async fn pay_guest_orders(&self, guest_id: GuestId) -> BoardResult<Vec<Order>> {
        self.inner.pay_guest_orders(guest_id).await
    }
}

/// Source whose `gated_call`-th order fetch reads its data, then waits for `release`
struct GatedSource {
    inner: InMemoryOrderSource,
    gated_call: usize,
    calls: AtomicUsize,
    fetched: Notify,
    release: Semaphore,
}

impl GatedSource {
    fn new(inner: InMemoryOrderSource, gated_call: usize) -> Self {
        Self {
            inner,
            gated_call,
            calls: AtomicUsize::new(0),
            fetched: Notify::new(),
            release: Semaphore::new(0),
        }
    }
}

#[async_trait]
impl OrderSource for GatedSource {
    async fn fetch_orders(&self, query: &GetOrdersQuery) -> BoardResult<Vec<Order>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let orders = self.inner.fetch_orders(query).await?;
        if call == self.gated_call {
            self.fetched.notify_one();
            let _permit = self
                .release
                .acquire()
                .await
                .map_err(|e| BoardError::Internal(e.to_string()))?;
        }
        Ok(orders)
    }

    async fn list_tables(&self) -> BoardResult<Vec<DiningTable>> {
        self.inner.list_tables().await
    }

    async fn pay_guest_orders(&self, guest_id: GuestId) -> BoardResult<Vec<Order>> {
        self.inner.pay_guest_orders(guest_id).await
    }
}

#[tokio::test]
async fn test_refresh_publishes_snapshot() {
    let source = dinner_service();
    let board = OrderBoard::new(Arc::new(source.clone()), service_day());
    assert!(board.snapshot().is_none());

    let snapshot = board.refresh().await.unwrap();

    assert_eq!(snapshot.statistics, aggregate(&source.orders()));
    assert_eq!(snapshot.statistics.status.total(), 5);
    assert_eq!(snapshot.cards.len(), 4);

    let card_1 = &snapshot.cards[0];
    assert_eq!(card_1.table_number, 1);
    assert!(!card_1.is_empty);
    assert_eq!(card_1.serving_guest_count, 1);

    let card_3 = &snapshot.cards[2];
    assert!(card_3.is_empty);
    assert_eq!(card_3.count(Rejected), 1);

    let card_4 = &snapshot.cards[3];
    assert!(card_4.is_empty);
    assert_eq!(card_4.counts.total(), 0);

    assert!(Arc::ptr_eq(&board.snapshot().unwrap(), &snapshot));
}

#[tokio::test]
async fn test_orders_outside_window_are_not_fetched() {
    let source = dinner_service();
    let mut yesterday = order(6, Pending, Some(4), Some(40));
    yesterday.created_at = common::at(0, 0) - chrono::Duration::hours(2);
    source.push_order(yesterday);
    let board = OrderBoard::new(Arc::new(source), service_day());

    let snapshot = board.refresh().await.unwrap();

    assert_eq!(snapshot.orders.len(), 5);
    assert!(!snapshot.statistics.serving_guests.contains_key(&4));
}

#[tokio::test]
async fn test_pay_guest_closes_table() {
    let source = dinner_service();
    let board = OrderBoard::new(Arc::new(source.clone()), service_day());
    board.refresh().await.unwrap();

    let checkout = board.checkout(10);
    assert_eq!(checkout.payable_count(), 1);
    assert_eq!(checkout.unpaid_total, rust_decimal::Decimal::from(70_000));

    let paid = board.pay_guest(10).await.unwrap();

    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].id, 1);
    let snapshot = board.snapshot().unwrap();
    assert!(!snapshot.statistics.serving_guests.contains_key(&1));
    assert!(snapshot.cards[0].is_empty);
    assert_eq!(snapshot.statistics.status.paid, 2);
    assert!(!board.checkout(10).can_pay());
}

#[tokio::test]
async fn test_pay_guest_with_nothing_open_is_refused() {
    let source = dinner_service();
    let board = OrderBoard::new(Arc::new(source.clone()), service_day());
    board.refresh().await.unwrap();

    let err = board.pay_guest(30).await.unwrap_err();

    assert!(matches!(err, BoardError::NothingToPay { guest_id: 30 }));
    assert_eq!(source.orders()[3].status, Rejected);
}

#[tokio::test]
async fn test_pay_before_first_refresh_is_refused() {
    let board = OrderBoard::new(Arc::new(dinner_service()), service_day());

    let err = board.pay_guest(10).await.unwrap_err();

    assert!(matches!(err, BoardError::NothingToPay { .. }));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let source = Arc::new(FlakySource {
        inner: dinner_service(),
        failing: AtomicBool::new(false),
    });
    let board = OrderBoard::new(source.clone(), service_day());
    let first = board.refresh().await.unwrap();

    source.failing.store(true, Ordering::SeqCst);
    let err = board.refresh().await.unwrap_err();

    assert!(matches!(err, BoardError::Internal(_)));
    assert!(Arc::ptr_eq(&board.snapshot().unwrap(), &first));
}

#[tokio::test]
async fn test_old_snapshots_are_never_modified() {
    let source = dinner_service();
    let board = OrderBoard::new(Arc::new(source.clone()), service_day());
    let before = board.refresh().await.unwrap();
    let before_stats = before.statistics.clone();

    source.set_status(3, Paid);
    let after = board.refresh().await.unwrap();

    assert!(after.generation > before.generation);
    assert_eq!(before.statistics, before_stats);
    assert!(before.statistics.serving_guests.contains_key(&2));
    assert!(!after.statistics.serving_guests.contains_key(&2));
}

#[tokio::test]
async fn test_slow_refresh_does_not_reopen_paid_guest() {
    let source = Arc::new(GatedSource::new(dinner_service(), 1));
    let board = Arc::new(OrderBoard::new(source.clone(), service_day()));
    board.refresh().await.unwrap();

    // A timer refresh reads guest 10's open order, then stalls
    let slow = {
        let board = board.clone();
        tokio::spawn(async move { board.refresh().await })
    };
    source.fetched.notified().await;

    board.pay_guest(10).await.unwrap();
    let after_payment = board.snapshot().unwrap();
    assert!(!board.checkout(10).can_pay());

    source.release.add_permits(1);
    let returned = slow.await.unwrap().unwrap();

    assert!(Arc::ptr_eq(&returned, &after_payment));
    assert!(Arc::ptr_eq(&board.snapshot().unwrap(), &after_payment));
    assert!(!board.checkout(10).can_pay());
    assert!(!after_payment.statistics.serving_guests.contains_key(&1));
}

#[tokio::test]
async fn test_run_refreshes_until_cancelled() {
    let board = Arc::new(OrderBoard::new(Arc::new(dinner_service()), service_day()));
    let cancel = CancellationToken::new();

    let handle = {
        let board = board.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { board.run(Duration::from_millis(10), cancel).await })
    };

    tokio::time::timeout(Duration::from_secs(5), async {
        while board.snapshot().is_none() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("board never refreshed");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("refresh loop did not stop")
        .unwrap();
}
