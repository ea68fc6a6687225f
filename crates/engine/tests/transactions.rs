use engine::{EngineError, TransactionKind, TransactionListFilter};
use uuid::Uuid;

mod common;

use common::{date, draft, engine_with_db, register};

#[tokio::test]
async fn create_update_delete() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    let tx = engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 12_50, "  Food ", date(2026, 10, 1)),
        )
        .await
        .unwrap();
    assert_eq!(tx.user_id, alice.id);
    assert_eq!(tx.category, "Food");

    let mut edit = draft(TransactionKind::Income, 30_00, "Gifts", date(2026, 10, 2));
    edit.description = "birthday".to_string();
    let updated = engine
        .update_transaction(alice.id, tx.id, edit)
        .await
        .unwrap();
    assert_eq!(updated.id, tx.id);
    assert_eq!(updated.kind, TransactionKind::Income);
    assert_eq!(updated.amount_minor, 30_00);
    assert_eq!(updated.description, "birthday");
    assert_eq!(updated.occurred_on, date(2026, 10, 2));

    engine.delete_transaction(alice.id, tx.id).await.unwrap();
    let page = engine
        .list_transactions(alice.id, &TransactionListFilter::default(), None, None)
        .await
        .unwrap();
    assert_eq!(page.total, 0);

    let err = engine.delete_transaction(alice.id, tx.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn rejects_invalid_drafts() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    let err = engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, -1, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 1_00, "   ", date(2026, 10, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn foreign_transactions_are_forbidden() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let mallory = register(&engine, "mallory@example.com").await;

    let tx = engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 5_00, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap();

    let err = engine
        .update_transaction(
            mallory.id,
            tx.id,
            draft(TransactionKind::Expense, 0, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine.delete_transaction(mallory.id, tx.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .update_transaction(
            alice.id,
            Uuid::new_v4(),
            draft(TransactionKind::Expense, 0, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn list_paginates_newest_first() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;

    for day in 1..=12 {
        engine
            .create_transaction(
                alice.id,
                draft(TransactionKind::Expense, 1_00, "Food", date(2026, 10, day)),
            )
            .await
            .unwrap();
    }
    engine
        .create_transaction(
            bob.id,
            draft(TransactionKind::Expense, 1_00, "Food", date(2026, 10, 20)),
        )
        .await
        .unwrap();

    let filter = TransactionListFilter::default();
    let first = engine
        .list_transactions(alice.id, &filter, None, None)
        .await
        .unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.page, 1);
    assert_eq!(first.pages, 2);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].occurred_on, date(2026, 10, 12));
    assert!(first.items.iter().all(|tx| tx.user_id == alice.id));

    let second = engine
        .list_transactions(alice.id, &filter, Some(2), None)
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[1].occurred_on, date(2026, 10, 1));

    let beyond = engine
        .list_transactions(alice.id, &filter, Some(5), Some(5))
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.pages, 3);

    let capped = engine
        .list_transactions(alice.id, &filter, Some(0), Some(1000))
        .await
        .unwrap();
    assert_eq!(capped.page, 1);
    assert_eq!(capped.pages, 1);
    assert_eq!(capped.items.len(), 12);
}

#[tokio::test]
async fn list_filters_by_kind_and_category() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    for draft in [
        draft(TransactionKind::Income, 1000_00, "Salary", date(2026, 10, 1)),
        draft(TransactionKind::Expense, 20_00, "Food", date(2026, 10, 2)),
        draft(TransactionKind::Expense, 30_00, "Travel", date(2026, 10, 3)),
        draft(TransactionKind::Expense, 40_00, "Food", date(2026, 10, 4)),
    ] {
        engine.create_transaction(alice.id, draft).await.unwrap();
    }

    let expenses = engine
        .list_transactions(
            alice.id,
            &TransactionListFilter {
                kind: Some(TransactionKind::Expense),
                category: None,
            },
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(expenses.total, 3);
    assert!(expenses.items.iter().all(|tx| tx.is_expense()));

    let food = engine
        .list_transactions(
            alice.id,
            &TransactionListFilter {
                kind: Some(TransactionKind::Expense),
                category: Some("Food".to_string()),
            },
            None,
            None,
        )
        .await
        .unwrap();
    let amounts: Vec<_> = food.items.iter().map(|tx| tx.amount_minor).collect();
    assert_eq!(amounts, [40_00, 20_00]);
}

#[tokio::test]
async fn oversized_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    for amount_minor in [i64::MAX, 1_000_000_000_000_001] {
        let err = engine
            .create_transaction(
                alice.id,
                draft(TransactionKind::Expense, amount_minor, "Food", date(2026, 10, 1)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    let tx = engine
        .create_transaction(
            alice.id,
            draft(TransactionKind::Expense, 5_00, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap();
    let err = engine
        .update_transaction(
            alice.id,
            tx.id,
            draft(TransactionKind::Expense, i64::MAX, "Food", date(2026, 10, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let page = engine
        .list_transactions(alice.id, &TransactionListFilter::default(), None, None)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].amount_minor, 5_00);
}

#[tokio::test]
async fn largest_amounts_still_aggregate() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;

    for _ in 0..2 {
        engine
            .create_transaction(
                alice.id,
                draft(
                    TransactionKind::Expense,
                    1_000_000_000_000_000,
                    "Food",
                    date(2026, 10, 1),
                ),
            )
            .await
            .unwrap();
    }

    let stats = engine
        .finance_stats(alice.id, date(2026, 10, 18))
        .await
        .unwrap();
    assert_eq!(stats.total_expenses.cents(), 2_000_000_000_000_000);
    assert_eq!(stats.balance.cents(), -2_000_000_000_000_000);
}
