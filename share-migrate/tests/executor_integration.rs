//! Integration tests for the migration executor.
//!
//! These tests use the real MigrationExecutor with in-memory share sources
//! and sinks in place of MySQL.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use share_migrate::controller::{exit_status, EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};
use share_migrate::{MigrationError, MigrationExecutor};
use share_migrate_repository::{
    ShareRepositoryError, ShareSink, ShareSource, ShareV8, ShareV9,
};

fn make_share(id: i64, owner: &str) -> ShareV8 {
    ShareV8 {
        id,
        share_type: 1,
        share_with: Some("group1".to_string()),
        uid_owner: owner.to_string(),
        parent: None,
        item_type: Some("file".to_string()),
        item_source: Some(id.to_string()),
        item_target: Some(format!("/{}", id)),
        file_source: Some(id),
        file_target: Some(format!("/doc{}.txt", id)),
        permissions: "19".to_string(),
        stime: 1_450_000_000,
        accepted: 0,
        expiration: None,
        token: None,
        mail_send: 0,
    }
}

// Mock source holding an in-memory oc_share table
struct MockSource {
    shares: Vec<ShareV8>,
    should_error: bool,
}

impl MockSource {
    fn new(shares: Vec<ShareV8>) -> Self {
        Self {
            shares,
            should_error: false,
        }
    }

    fn with_numbered_shares(count: i64) -> Self {
        Self::new((1..=count).map(|id| make_share(id, "alice")).collect())
    }

    fn failing() -> Self {
        Self {
            shares: Vec::new(),
            should_error: true,
        }
    }
}

#[async_trait::async_trait]
impl ShareSource for MockSource {
    async fn fetch_all(&self, owner: Option<&str>) -> Result<Vec<ShareV8>, ShareRepositoryError> {
        if self.should_error {
            return Err(ShareRepositoryError::Query(sqlx::Error::PoolClosed));
        }
        let mut shares: Vec<ShareV8> = self
            .shares
            .iter()
            .filter(|s| owner.map_or(true, |owner| s.uid_owner == owner))
            .cloned()
            .collect();
        shares.sort_by_key(|s| s.id);
        Ok(shares)
    }
}

// Mock sink recording writes, with optional failures and a write delay
#[derive(Default)]
struct MockSink {
    written: Mutex<Vec<ShareV9>>,
    fail_ids: HashSet<i64>,
    panic_ids: HashSet<i64>,
    delay: Option<Duration>,
    dry_run: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl MockSink {
    fn new() -> Self {
        Self::default()
    }

    fn written_ids(&self) -> Vec<i64> {
        self.written.lock().unwrap().iter().map(|s| s.share.id).collect()
    }

    fn written_count(&self) -> usize {
        self.written.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ShareSink for MockSink {
    async fn write_share(&self, share: &ShareV9) -> Result<(), ShareRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let id = share.share.id;
        if self.panic_ids.contains(&id) {
            panic!("mock sink panic for share {}", id);
        }
        if self.fail_ids.contains(&id) {
            return Err(ShareRepositoryError::InvalidShare {
                id,
                reason: "duplicate entry".to_string(),
            });
        }
        if !self.dry_run {
            self.written.lock().unwrap().push(share.clone());
        }
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

fn executor(source: MockSource, sink: Arc<MockSink>) -> MigrationExecutor {
    MigrationExecutor::new(Arc::new(source), sink)
}

#[tokio::test]
async fn test_migrates_every_share() {
    let sink = Arc::new(MockSink::new());

    let report = executor(MockSource::with_numbered_shares(25), sink.clone())
        .execute(None)
        .await
        .unwrap();

    assert_eq!(report.total, 25);
    assert_eq!(report.migrated, 25);
    assert_eq!(report.failed, 0);
    assert!(!report.dry_run);

    let mut ids = sink.written_ids();
    ids.sort_unstable();
    assert_eq!(ids, (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_owner_filter_end_to_end() {
    let source = MockSource::new(vec![
        make_share(1, "a"),
        make_share(2, "b"),
        make_share(3, "a"),
    ]);
    let sink = Arc::new(MockSink::new());

    let report = executor(source, sink.clone())
        .execute(Some("a"))
        .await
        .unwrap();

    assert_eq!(report.total, 2);
    let mut written = sink.written.lock().unwrap().clone();
    written.sort_by_key(|s| s.share.id);
    assert_eq!(
        written.iter().map(|s| s.share.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    for share in &written {
        assert_eq!(share.uid_initiator, "a");
        assert_eq!(share.share.uid_owner, "a");
        assert_eq!(share.share, make_share(share.share.id, "a"));
    }
}

#[tokio::test]
async fn test_one_failed_write_does_not_stop_the_rest() {
    let sink = Arc::new(MockSink {
        fail_ids: HashSet::from([4]),
        ..MockSink::default()
    });

    let report = executor(MockSource::with_numbered_shares(10), sink.clone())
        .execute(None)
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.migrated, 9);
    assert_eq!(sink.calls.load(Ordering::SeqCst), 10);
    assert!(!sink.written_ids().contains(&4));
    assert_eq!(sink.written_count(), 9);

    assert_eq!(exit_status(&report, false), EXIT_SUCCESS);
    assert_eq!(exit_status(&report, true), EXIT_PARTIAL_FAILURE);
}

#[tokio::test]
async fn test_panicking_write_is_isolated() {
    let sink = Arc::new(MockSink {
        panic_ids: HashSet::from([2]),
        ..MockSink::default()
    });

    let report = executor(MockSource::with_numbered_shares(5), sink.clone())
        .with_max_concurrency(2)
        .execute(None)
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.migrated, 4);
    assert_eq!(sink.written_count(), 4);
}

#[tokio::test]
async fn test_dry_run_reports_success_without_writes() {
    let sink = Arc::new(MockSink {
        dry_run: true,
        ..MockSink::default()
    });

    let report = executor(MockSource::with_numbered_shares(8), sink.clone())
        .execute(None)
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.migrated, 8);
    assert_eq!(sink.calls.load(Ordering::SeqCst), 8);
    assert_eq!(sink.written_count(), 0);
    assert!(report.to_string().starts_with("Success. Dry run: true"));
}

#[tokio::test]
async fn test_empty_source_is_fatal() {
    let sink = Arc::new(MockSink::new());

    let err = executor(MockSource::new(Vec::new()), sink.clone())
        .execute(None)
        .await
        .unwrap_err();

    assert!(matches!(err, MigrationError::EmptySource { owner: None }));
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_owner_is_fatal() {
    let sink = Arc::new(MockSink::new());

    let err = executor(MockSource::with_numbered_shares(3), sink.clone())
        .execute(Some("nobody"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MigrationError::EmptySource { owner: Some(ref owner) } if owner == "nobody"
    ));
    assert!(err.to_string().contains("owned by nobody"));
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_failure_is_fatal() {
    let sink = Arc::new(MockSink::new());

    let err = executor(MockSource::failing(), sink.clone())
        .execute(None)
        .await
        .unwrap_err();

    assert!(matches!(err, MigrationError::Query(_)));
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_is_respected() {
    let sink = Arc::new(MockSink {
        delay: Some(Duration::from_millis(2)),
        ..MockSink::default()
    });

    let report = executor(MockSource::with_numbered_shares(1200), sink.clone())
        .with_max_concurrency(20)
        .execute(None)
        .await
        .unwrap();

    assert_eq!(report.migrated, 1200);
    let max_in_flight = sink.max_in_flight.load(Ordering::SeqCst);
    assert!(max_in_flight <= 20, "observed {} concurrent writes", max_in_flight);
    assert!(max_in_flight > 1, "writes never overlapped");
}

#[tokio::test]
async fn test_shares_are_scheduled_in_id_order() {
    let source = MockSource::new(vec![
        make_share(30, "a"),
        make_share(10, "a"),
        make_share(20, "a"),
    ]);
    let sink = Arc::new(MockSink::new());

    executor(source, sink.clone())
        .with_max_concurrency(1)
        .execute(None)
        .await
        .unwrap();

    assert_eq!(sink.written_ids(), vec![10, 20, 30]);
}

#[tokio::test]
async fn test_zero_concurrency_still_migrates() {
    let sink = Arc::new(MockSink::new());

    let report = executor(MockSource::with_numbered_shares(3), sink.clone())
        .with_max_concurrency(0)
        .execute(None)
        .await
        .unwrap();

    assert_eq!(report.migrated, 3);
    assert_eq!(sink.max_in_flight.load(Ordering::SeqCst), 1);
}
