use chrono::NaiveDate;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionDraft, TransactionKind, transactions,
};

use super::Engine;

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// Optional filters for [`Engine::list_transactions`].
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

/// One page of transactions, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    /// Number of transactions matching the filter, across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    pub pages: u64,
}

impl Engine {
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(user_id, draft)?;
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Ok(tx)
    }

    /// Replace every editable field of a transaction owned by `user_id`.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let draft = draft.validated()?;
        let model = self
            .require_owned_transaction(user_id, transaction_id)
            .await?;

        let mut active: transactions::ActiveModel = model.into();
        active.kind = ActiveValue::Set(draft.kind.as_str().to_string());
        active.amount_minor = ActiveValue::Set(draft.amount_minor);
        active.category = ActiveValue::Set(draft.category);
        active.description = ActiveValue::Set(draft.description);
        active.occurred_on = ActiveValue::Set(draft.occurred_on);

        let model = active.update(&self.database).await?;
        Transaction::try_from(model)
    }

    pub async fn delete_transaction(&self, user_id: Uuid, transaction_id: Uuid) -> ResultEngine<()> {
        let model = self
            .require_owned_transaction(user_id, transaction_id)
            .await?;
        model.delete(&self.database).await?;
        Ok(())
    }

    /// List the user's transactions, newest first.
    ///
    /// `page` is 1-based and defaults to 1; `limit` defaults to 10 and is
    /// capped at 100.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionListFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> ResultEngine<TransactionPage> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let mut query = transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(category) = filter.category.as_deref() {
            query = query.filter(transactions::Column::Category.eq(category));
        }

        let paginator = query
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.database, limit);
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(TransactionPage {
            items,
            total,
            page,
            pages: total.div_ceil(limit),
        })
    }

    /// Every transaction of a user in recording order, optionally restricted to
    /// an inclusive date range and a kind.
    pub(super) async fn user_transactions(
        &self,
        user_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
        kind: Option<TransactionKind>,
    ) -> ResultEngine<Vec<Transaction>> {
        let mut query = transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some((from, to)) = range {
            query = query.filter(transactions::Column::OccurredOn.between(from, to));
        }
        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }

        query
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::OccurredOn)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn require_owned_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        let model = transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::Forbidden(
                "transaction belongs to another user".to_string(),
            ));
        }
        Ok(model)
    }
}
