use chrono::{TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use gateway::{Gateway, GatewayError, Revision};
use ledger::{Amount, CategorySet, ExpenseFields, ExpenseId, ValidationPolicy};
use migration::MigratorTrait;

async fn gateway_with_db() -> (Gateway, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let gateway = Gateway::builder().database(db.clone()).build();
    (gateway, db)
}

fn coffee(amount: &str) -> ExpenseFields {
    ExpenseFields::new(
        "Coffee",
        amount.parse::<Amount>().unwrap(),
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        "Food",
    )
}

#[tokio::test]
async fn create_update_delete_scenario() {
    let (gateway, _db) = gateway_with_db().await;

    let created = gateway.create(coffee("3.5")).await.unwrap();
    let r1 = created.revision.clone();

    let r2 = gateway.update(created.id, &r1, coffee("4.0")).await.unwrap();
    assert_ne!(r1, r2);

    let stale = gateway.update(created.id, &r1, coffee("5.0")).await;
    assert_eq!(
        stale,
        Err(GatewayError::RevisionConflict {
            id: created.id.to_string(),
            expected: r1.to_string(),
            current: r2.to_string(),
        })
    );

    let stored = gateway.get(created.id).await.unwrap();
    assert_eq!(stored.revision, r2);
    assert_eq!(stored.expense.amount, Amount::new(400));

    gateway.delete(created.id, &r2).await.unwrap();

    let listed = gateway.list().await.unwrap();
    assert!(listed.iter().all(|doc| doc.expense.id != created.id));
}

#[tokio::test]
async fn create_returns_store_assigned_identity() {
    let (gateway, _db) = gateway_with_db().await;

    let first = gateway.create(coffee("3.5")).await.unwrap();
    let second = gateway.create(coffee("3.5")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.revision.generation(), Some(1));

    let listed = gateway.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].expense.id, first.id);
    assert_eq!(listed[0].revision, first.revision);
    assert_eq!(listed[0].expense.description, "Coffee");
    assert_eq!(
        listed[0].expense.occurred_at.timestamp_millis(),
        1_700_000_000_000
    );
}

#[tokio::test]
async fn concurrent_updates_with_same_revision_have_one_winner() {
    let (gateway, _db) = gateway_with_db().await;
    let created = gateway.create(coffee("3.5")).await.unwrap();

    let (left, right) = tokio::join!(
        gateway.update(created.id, &created.revision, coffee("4.0")),
        gateway.update(created.id, &created.revision, coffee("4.5")),
    );

    let outcomes = [left, right];
    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(GatewayError::RevisionConflict { .. })))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 1);

    let winner = outcomes.iter().find_map(|r| r.as_ref().ok()).unwrap();
    let stored = gateway.get(created.id).await.unwrap();
    assert_eq!(&stored.revision, winner);
}

#[tokio::test]
async fn delete_with_stale_revision_keeps_document() {
    let (gateway, _db) = gateway_with_db().await;
    let created = gateway.create(coffee("3.5")).await.unwrap();
    gateway
        .update(created.id, &created.revision, coffee("4.0"))
        .await
        .unwrap();

    let result = gateway.delete(created.id, &created.revision).await;

    assert!(matches!(result, Err(GatewayError::RevisionConflict { .. })));
    assert!(gateway.get(created.id).await.is_ok());
}

#[tokio::test]
async fn missing_documents_are_not_found() {
    let (gateway, _db) = gateway_with_db().await;
    let id = ExpenseId::new();
    let revision = Revision::from("1-0000");

    assert!(matches!(
        gateway.get(id).await,
        Err(GatewayError::NotFound(_))
    ));
    assert!(matches!(
        gateway.update(id, &revision, coffee("1")).await,
        Err(GatewayError::NotFound(_))
    ));
    assert!(matches!(
        gateway.delete(id, &revision).await,
        Err(GatewayError::NotFound(_))
    ));
}

#[tokio::test]
async fn strict_policy_rejects_before_writing() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let gateway = Gateway::builder()
        .database(db)
        .policy(ValidationPolicy::strict(CategorySet::default()))
        .build();

    let mut bad = coffee("3.5");
    bad.category = "Gadgets".into();
    let result = gateway.create(bad).await;

    assert!(matches!(result, Err(GatewayError::ValidationFailure(_))));
    assert!(gateway.list().await.unwrap().is_empty());

    let created = gateway.create(coffee("3.5")).await.unwrap();
    let result = gateway
        .update(created.id, &created.revision, coffee("0"))
        .await;
    assert!(matches!(result, Err(GatewayError::ValidationFailure(_))));
    assert_eq!(gateway.get(created.id).await.unwrap().revision, created.revision);
}

#[tokio::test]
async fn closed_store_is_unavailable() {
    let (gateway, _db) = gateway_with_db().await;
    let created = gateway.create(coffee("3.5")).await.unwrap();
    gateway.close().await.unwrap();

    let listed = gateway.list().await;
    assert!(matches!(listed, Err(GatewayError::StoreUnavailable(_))));
    assert!(listed.unwrap_err().is_transient());

    let writes = [
        gateway.create(coffee("1")).await.map(|_| ()),
        gateway
            .update(created.id, &created.revision, coffee("4.0"))
            .await
            .map(|_| ()),
        gateway.delete(created.id, &created.revision).await,
    ];
    for result in writes {
        let err = result.unwrap_err();
        assert!(matches!(err, GatewayError::StoreUnavailable(_)));
        assert!(err.is_transient());
    }
}
