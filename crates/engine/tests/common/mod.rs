#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, NewUser, TransactionDraft, TransactionKind, User};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_cost(4)
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn register(engine: &Engine, email: &str) -> User {
    engine
        .register_user(NewUser {
            email: email.to_string(),
            password: "password".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            currency: None,
        })
        .await
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn draft(kind: TransactionKind, amount_minor: i64, category: &str, on: NaiveDate) -> TransactionDraft {
    TransactionDraft {
        kind,
        amount_minor,
        category: category.to_string(),
        description: format!("{category} entry"),
        occurred_on: on,
    }
}

/// Income 1000 Salary, expense 200 Groceries and 100 Transport, all in October 2026.
pub async fn record_october_sample(engine: &Engine, user: &User) {
    for draft in [
        draft(TransactionKind::Income, 1000_00, "Salary", date(2026, 10, 5)),
        draft(TransactionKind::Expense, 200_00, "Groceries", date(2026, 10, 10)),
        draft(TransactionKind::Expense, 100_00, "Transport", date(2026, 10, 15)),
    ] {
        engine.create_transaction(user.id, draft).await.unwrap();
    }
}
