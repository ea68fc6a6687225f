//! Monthly budgets.
//!
//! A user has at most one `Budget` per calendar month. It holds an ordered list
//! of category limits; names are unique inside a budget.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BudgetMonth, MoneyCents, ResultEngine, budget_categories,
    util::{ensure_amount_in_range, normalize_required_name},
};

/// Limits seeded into a budget the first time its month is accessed, in minor units.
pub const DEFAULT_CATEGORIES: [(&str, i64); 5] = [
    ("Groceries", 400_00),
    ("Transport", 150_00),
    ("Housing", 1200_00),
    ("Food", 300_00),
    ("Entertainment", 200_00),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub limit_minor: i64,
}

impl BudgetCategory {
    pub fn limit(&self) -> MoneyCents {
        MoneyCents::new(self.limit_minor)
    }
}

/// A requested change of a category limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitUpdate {
    pub name: String,
    pub limit_minor: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub period: BudgetMonth,
    pub categories: Vec<BudgetCategory>,
}

impl Budget {
    /// A new budget seeded with [`DEFAULT_CATEGORIES`].
    pub fn with_defaults(user_id: Uuid, period: BudgetMonth) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            period,
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, limit_minor)| BudgetCategory {
                    name: (*name).to_string(),
                    limit_minor: *limit_minor,
                })
                .collect(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn total_limit(&self) -> MoneyCents {
        self.categories.iter().map(BudgetCategory::limit).sum()
    }

    /// Overwrite the limit of each named category, appending unknown names.
    ///
    /// Updates apply in input order, so a later entry for the same name wins.
    /// All entries are validated first: on error the budget is left untouched.
    pub fn apply_limit_updates(&mut self, updates: &[LimitUpdate]) -> ResultEngine<()> {
        let updates = updates
            .iter()
            .map(|update| {
                ensure_amount_in_range(update.limit_minor, "limit")?;
                Ok(LimitUpdate {
                    name: normalize_required_name(&update.name, "category name")?,
                    limit_minor: update.limit_minor,
                })
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        for update in updates {
            match self
                .categories
                .iter_mut()
                .find(|category| category.name == update.name)
            {
                Some(category) => category.limit_minor = update.limit_minor,
                None => self.categories.push(BudgetCategory {
                    name: update.name,
                    limit_minor: update.limit_minor,
                }),
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub month: i32,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::budget_categories::Entity")]
    Categories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::budget_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<(Model, Vec<budget_categories::Model>)> for Budget {
    type Error = crate::EngineError;

    fn try_from(
        (model, mut categories): (Model, Vec<budget_categories::Model>),
    ) -> Result<Self, Self::Error> {
        let month = u32::try_from(model.month).map_err(|_| {
            crate::EngineError::InvalidDate(format!("invalid stored month {}", model.month))
        })?;
        categories.sort_by_key(|category| category.position);
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            period: BudgetMonth::new(month, model.year)?,
            categories: categories
                .into_iter()
                .map(|category| BudgetCategory {
                    name: category.name,
                    limit_minor: category.limit_minor,
                })
                .collect(),
        })
    }
}
