//! Integration tests for the Diesel record repositories against embedded
//! PostgreSQL.
//!
//! Opt-in: run `cargo test -- --ignored` with `RUN_PG_EMBEDDED=1`.

use pagination::PageRequest;
use pg_embedded_setup_unpriv::TestCluster;
use storefront::domain::ports::{RepositoryError, ResourceRepository};
use storefront::domain::{ArchiveFilter, NewRecord, RecordChanges, RecordId, RecordName};
use storefront::outbound::persistence::{
    DbPool, DieselProductRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations_blocking,
};
use tokio::runtime::Runtime;

fn enabled() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}

/// Start a cluster, migrate the default database, and build a pool.
fn migrated_pool(runtime: &Runtime) -> (TestCluster, DbPool) {
    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let url = cluster.connection().database_url("postgres");
    run_pending_migrations_blocking(&url).expect("migrations apply");
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .expect("pool builds");
    (cluster, pool)
}

fn new_record(name: &str, detail: Option<&str>, at: i64) -> NewRecord {
    NewRecord::new(
        RecordName::new(name).expect("valid name"),
        detail.map(str::to_owned),
        at,
    )
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn product_lifecycle_round_trips_through_postgres() {
    if !enabled() {
        return;
    }
    let runtime = Runtime::new().expect("runtime");
    let (_cluster, pool) = migrated_pool(&runtime);
    let repo = DieselProductRepository::new(pool);

    runtime.block_on(async {
        let id = repo
            .create(&new_record("Widget", Some("Blue"), 100))
            .await
            .expect("insert");
        let stored = repo.read_one(&id).await.expect("read back");
        assert_eq!(stored.name(), "Widget");
        assert_eq!(stored.detail(), Some("Blue"));
        assert!(!stored.is_archived());
        assert_eq!(stored.created_at(), stored.updated_at());

        let changes = RecordChanges {
            name: RecordName::new("Gadget").expect("valid name"),
            detail: None,
            updated_at: 200,
        };
        assert_eq!(repo.update(&id, &changes).await.expect("update"), 1);
        let updated = repo.read_one(&id).await.expect("read updated");
        assert_eq!(updated.name(), "Gadget");
        assert_eq!(updated.detail(), None);
        assert_eq!(updated.created_at(), 100);
        assert_eq!(updated.updated_at(), 200);

        assert_eq!(repo.archive(&id, 300).await.expect("archive"), 1);
        let archived = repo
            .read_many(PageRequest::default(), ArchiveFilter::only(true))
            .await
            .expect("archived page");
        assert_eq!(archived.len(), 1);

        let missing = RecordId::random();
        assert_eq!(repo.archive(&missing, 300).await.expect("archive"), 0);
        assert_eq!(
            repo.read_one(&missing).await.expect_err("missing"),
            RepositoryError::not_found(missing)
        );
    });
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn user_pages_are_stable() {
    if !enabled() {
        return;
    }
    let runtime = Runtime::new().expect("runtime");
    let (_cluster, pool) = migrated_pool(&runtime);
    let repo = DieselUserRepository::new(pool);

    runtime.block_on(async {
        let mut ids = Vec::new();
        for index in 0..5 {
            let id = repo
                .create(&new_record(&format!("user-{index}"), None, index))
                .await
                .expect("insert");
            ids.push(id);
        }

        let mut seen = Vec::new();
        for page in 1..=3 {
            let records = repo
                .read_many(PageRequest::new(2, page), ArchiveFilter::any())
                .await
                .expect("page");
            seen.extend(records.iter().map(|record| record.id()));
        }
        assert_eq!(seen, ids);
    });
}
