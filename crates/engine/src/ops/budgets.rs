use std::collections::HashMap;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Budget, BudgetMonth, BudgetReport, CategoryTotals, EngineError, LimitUpdate, ResultEngine,
    TransactionKind, budget_categories, budgets, spending::monthly_spend_by_category,
};

use super::Engine;

impl Engine {
    /// Return the user's budget for `period`, creating it with the default
    /// categories on first access.
    ///
    /// Existing budgets are returned untouched. When two callers race on the
    /// first access, the unique `(user_id, month, year)` index rejects the
    /// second insert and that caller reads back the stored budget instead.
    pub async fn resolve_budget(&self, user_id: Uuid, period: BudgetMonth) -> ResultEngine<Budget> {
        if let Some(budget) = find_budget(&self.database, user_id, period).await? {
            return Ok(budget);
        }

        let budget = Budget::with_defaults(user_id, period);
        match self.insert_budget(&budget).await {
            Ok(()) => {
                tracing::info!("created default budget {} for {period}", budget.id);
                Ok(budget)
            }
            Err(err) if err.is_unique_violation() => {
                tracing::debug!("budget for {period} created concurrently, reading it back");
                find_budget(&self.database, user_id, period)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// A budget by id, if it belongs to `user_id`.
    pub async fn budget(&self, budget_id: Uuid, user_id: Uuid) -> ResultEngine<Budget> {
        require_owned_budget(&self.database, budget_id, user_id).await
    }

    /// Overwrite or append category limits of a budget owned by `user_id`.
    ///
    /// The whole batch is validated before anything is written.
    pub async fn apply_limit_updates(
        &self,
        budget_id: Uuid,
        user_id: Uuid,
        updates: &[LimitUpdate],
    ) -> ResultEngine<Budget> {
        let db_tx = self.database.begin().await?;
        let mut budget = require_owned_budget(&db_tx, budget_id, user_id).await?;
        budget.apply_limit_updates(updates)?;

        let stored: HashMap<String, budget_categories::Model> = budget_categories::Entity::find()
            .filter(budget_categories::Column::BudgetId.eq(budget_id))
            .all(&db_tx)
            .await?
            .into_iter()
            .map(|model| (model.name.clone(), model))
            .collect();

        for (position, category) in budget.categories.iter().enumerate() {
            match stored.get(&category.name) {
                Some(model) if model.limit_minor == category.limit_minor => {}
                Some(model) => {
                    budget_categories::ActiveModel {
                        id: ActiveValue::Set(model.id),
                        limit_minor: ActiveValue::Set(category.limit_minor),
                        ..Default::default()
                    }
                    .update(&db_tx)
                    .await?;
                }
                None => {
                    category_model(budget_id, position, &category.name, category.limit_minor)
                        .insert(&db_tx)
                        .await?;
                }
            }
        }

        db_tx.commit().await?;
        Ok(budget)
    }

    /// Expense totals per category of `user_id` for `period`.
    pub async fn monthly_spend_by_category(
        &self,
        user_id: Uuid,
        period: BudgetMonth,
    ) -> ResultEngine<CategoryTotals> {
        let expenses = self
            .user_transactions(
                user_id,
                Some((period.first_day(), period.last_day())),
                Some(TransactionKind::Expense),
            )
            .await?;
        Ok(monthly_spend_by_category(period, &expenses))
    }

    /// The budget of `period` (created on first access) merged with that
    /// month's spending.
    pub async fn budget_report(&self, user_id: Uuid, period: BudgetMonth) -> ResultEngine<BudgetReport> {
        let budget = self.resolve_budget(user_id, period).await?;
        let spend = self.monthly_spend_by_category(user_id, period).await?;
        Ok(BudgetReport::merge(&budget, &spend))
    }

    async fn insert_budget(&self, budget: &Budget) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;
        budgets::ActiveModel {
            id: ActiveValue::Set(budget.id),
            user_id: ActiveValue::Set(budget.user_id),
            month: ActiveValue::Set(budget.period.month() as i32),
            year: ActiveValue::Set(budget.period.year()),
        }
        .insert(&db_tx)
        .await?;
        for (position, category) in budget.categories.iter().enumerate() {
            category_model(budget.id, position, &category.name, category.limit_minor)
                .insert(&db_tx)
                .await?;
        }
        db_tx.commit().await?;
        Ok(())
    }
}

fn category_model(
    budget_id: Uuid,
    position: usize,
    name: &str,
    limit_minor: i64,
) -> budget_categories::ActiveModel {
    budget_categories::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        budget_id: ActiveValue::Set(budget_id),
        position: ActiveValue::Set(position as i32),
        name: ActiveValue::Set(name.to_string()),
        limit_minor: ActiveValue::Set(limit_minor),
    }
}

async fn load_budget<C: ConnectionTrait>(db: &C, model: budgets::Model) -> ResultEngine<Budget> {
    let categories = budget_categories::Entity::find()
        .filter(budget_categories::Column::BudgetId.eq(model.id))
        .all(db)
        .await?;
    Budget::try_from((model, categories))
}

async fn find_budget<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    period: BudgetMonth,
) -> ResultEngine<Option<Budget>> {
    let model = budgets::Entity::find()
        .filter(budgets::Column::UserId.eq(user_id))
        .filter(budgets::Column::Month.eq(period.month() as i32))
        .filter(budgets::Column::Year.eq(period.year()))
        .one(db)
        .await?;
    match model {
        Some(model) => load_budget(db, model).await.map(Some),
        None => Ok(None),
    }
}

async fn require_owned_budget<C: ConnectionTrait>(
    db: &C,
    budget_id: Uuid,
    user_id: Uuid,
) -> ResultEngine<Budget> {
    let model = budgets::Entity::find_by_id(budget_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;
    if model.user_id != user_id {
        return Err(EngineError::Forbidden(
            "budget belongs to another user".to_string(),
        ));
    }
    load_budget(db, model).await
}
