use chrono::NaiveDate;
use uuid::Uuid;

use crate::{FinanceStats, ResultEngine, spending::finance_stats};

use super::Engine;

impl Engine {
    /// Statistics of the month containing `today`, over every transaction of
    /// the user (the balance is lifetime, the totals are monthly).
    pub async fn finance_stats(&self, user_id: Uuid, today: NaiveDate) -> ResultEngine<FinanceStats> {
        let transactions = self.user_transactions(user_id, None, None).await?;
        Ok(finance_stats(today, &transactions))
    }
}
