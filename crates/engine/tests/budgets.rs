use sea_orm::{ConnectionTrait, Statement};

use engine::{BudgetMonth, BudgetStatus, EngineError, LimitUpdate, MoneyCents, TransactionKind};

mod common;

use common::{date, draft, engine_with_db, record_october_sample, register};

fn october() -> BudgetMonth {
    BudgetMonth::new(9, 2026).unwrap()
}

fn update(name: &str, limit_minor: i64) -> LimitUpdate {
    LimitUpdate {
        name: name.to_string(),
        limit_minor,
    }
}

async fn count_budgets(db: &sea_orm::DatabaseConnection) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM budgets",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn resolve_creates_default_budget_once() {
    let (engine, db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    let first = engine.resolve_budget(alice.id, october()).await.unwrap();
    let second = engine.resolve_budget(alice.id, october()).await.unwrap();

    assert_eq!(first, second);
    let names: Vec<_> = first.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["Groceries", "Transport", "Housing", "Food", "Entertainment"]
    );
    assert_eq!(first.category("Housing").unwrap().limit_minor, 1200_00);
    assert_eq!(count_budgets(&db).await, 1);
}

#[tokio::test]
async fn resolve_keeps_months_and_users_apart() {
    let (engine, db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;

    let october_budget = engine.resolve_budget(alice.id, october()).await.unwrap();
    let september_budget = engine
        .resolve_budget(alice.id, october().previous())
        .await
        .unwrap();
    let bob_budget = engine.resolve_budget(bob.id, october()).await.unwrap();

    assert_ne!(october_budget.id, september_budget.id);
    assert_ne!(october_budget.id, bob_budget.id);
    assert_eq!(september_budget.period, BudgetMonth::new(8, 2026).unwrap());
    assert_eq!(count_budgets(&db).await, 3);
}

#[tokio::test]
async fn resolve_never_overwrites_existing_limits() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    let budget = engine.resolve_budget(alice.id, october()).await.unwrap();
    engine
        .apply_limit_updates(budget.id, alice.id, &[update("Groceries", 999_00)])
        .await
        .unwrap();

    let resolved = engine.resolve_budget(alice.id, october()).await.unwrap();
    assert_eq!(resolved.category("Groceries").unwrap().limit_minor, 999_00);
}

#[tokio::test]
async fn concurrent_resolve_yields_a_single_budget() {
    let (engine, db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    let (left, right) = tokio::join!(
        engine.resolve_budget(alice.id, october()),
        engine.resolve_budget(alice.id, october())
    );
    let (left, right) = (left.unwrap(), right.unwrap());

    assert_eq!(left, right);
    assert_eq!(left.categories.len(), 5);
    assert_eq!(count_budgets(&db).await, 1);
}

#[tokio::test]
async fn duplicate_budget_rows_are_rejected_by_storage() {
    let (engine, db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    engine.resolve_budget(alice.id, october()).await.unwrap();

    let backend = db.get_database_backend();
    let err = db
        .execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO budgets (id, user_id, month, year) VALUES (?, ?, ?, ?)",
            vec![
                uuid::Uuid::new_v4().into(),
                alice.id.into(),
                9i32.into(),
                2026i32.into(),
            ],
        ))
        .await
        .unwrap_err();

    assert!(EngineError::from(err).is_unique_violation());
}

#[tokio::test]
async fn limit_updates_overwrite_and_append() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let budget = engine.resolve_budget(alice.id, october()).await.unwrap();

    let updated = engine
        .apply_limit_updates(
            budget.id,
            alice.id,
            &[update("Groceries", 450_00), update("NewCat", 100_00)],
        )
        .await
        .unwrap();

    assert_eq!(updated.category("Groceries").unwrap().limit_minor, 450_00);
    assert_eq!(updated.categories.last().unwrap().name, "NewCat");
    assert_eq!(updated.category("NewCat").unwrap().limit_minor, 100_00);
    assert_eq!(updated.category("Transport").unwrap().limit_minor, 150_00);

    let stored = engine.budget(budget.id, alice.id).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn limit_updates_check_ownership_and_existence() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let mallory = register(&engine, "mallory@example.com").await;
    let budget = engine.resolve_budget(alice.id, october()).await.unwrap();

    let err = engine
        .apply_limit_updates(budget.id, mallory.id, &[update("Groceries", 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .apply_limit_updates(uuid::Uuid::new_v4(), alice.id, &[update("Groceries", 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn malformed_limit_updates_persist_nothing() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let budget = engine.resolve_budget(alice.id, october()).await.unwrap();

    let err = engine
        .apply_limit_updates(
            budget.id,
            alice.id,
            &[update("Groceries", 10_00), update("Food", -5)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let stored = engine.budget(budget.id, alice.id).await.unwrap();
    assert_eq!(stored, budget);
}

#[tokio::test]
async fn spend_by_category_reads_the_month_of_the_user() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;
    record_october_sample(&engine, &alice).await;
    engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 500_00, "Groceries", date(2026, 9, 30)),
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            bob.id,
            draft(TransactionKind::Expense, 70_00, "Groceries", date(2026, 10, 3)),
        )
        .await
        .unwrap();

    let spend = engine
        .monthly_spend_by_category(alice.id, october())
        .await
        .unwrap();

    assert_eq!(spend.len(), 2);
    assert_eq!(spend.get("Groceries"), Some(MoneyCents::new(200_00)));
    assert_eq!(spend.get("Transport"), Some(MoneyCents::new(100_00)));
}

#[tokio::test]
async fn report_merges_limits_and_spending() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    record_october_sample(&engine, &alice).await;
    engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 80_00, "Travel", date(2026, 10, 20)),
        )
        .await
        .unwrap();

    let report = engine.budget_report(alice.id, october()).await.unwrap();

    let groceries = report.row("Groceries").unwrap();
    assert_eq!(groceries.spent, MoneyCents::new(200_00));
    assert_eq!(groceries.remaining, MoneyCents::new(200_00));
    assert_eq!(groceries.percentage, 50.0);
    assert_eq!(groceries.status, BudgetStatus::OnTrack);

    let transport = report.row("Transport").unwrap();
    assert_eq!(transport.remaining, MoneyCents::new(50_00));
    assert!((transport.percentage - 66.67).abs() < 0.01);

    for name in ["Housing", "Food", "Entertainment"] {
        assert_eq!(report.row(name).unwrap().spent, MoneyCents::ZERO);
    }
    assert!(report.row("Travel").is_none());
    assert_eq!(report.total_limit, MoneyCents::new(2250_00));
    assert_eq!(report.total_spent, MoneyCents::new(380_00));
}

#[tokio::test]
async fn oversized_limits_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let budget = engine.resolve_budget(alice.id, october()).await.unwrap();

    let err = engine
        .apply_limit_updates(budget.id, alice.id, &[update("Groceries", i64::MAX)])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let report = engine.budget_report(alice.id, october()).await.unwrap();
    assert_eq!(report.row("Groceries").unwrap().limit, MoneyCents::new(400_00));
    assert_eq!(report.total_limit, MoneyCents::new(2250_00));
}
