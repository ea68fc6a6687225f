use sea_orm::{ActiveValue, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewUser, ProfileChanges, ResultEngine, User, users,
    util::{normalize_email, normalize_optional_text, normalize_required_name},
};

use super::Engine;

impl Engine {
    /// Register a new user. The email must not be taken.
    pub async fn register_user(&self, new_user: NewUser) -> ResultEngine<User> {
        let email = normalize_email(&new_user.email)?;
        if new_user.password.is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(EngineError::ExistingKey(email));
        }

        let model = users::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(email.clone()),
            password_hash: ActiveValue::Set(bcrypt::hash(
                &new_user.password,
                self.password_cost,
            )?),
            first_name: ActiveValue::Set(normalize_required_name(
                &new_user.first_name,
                "first name",
            )?),
            last_name: ActiveValue::Set(normalize_required_name(
                &new_user.last_name,
                "last name",
            )?),
            currency: ActiveValue::Set(new_user.currency.unwrap_or_default().code().to_string()),
        };

        let model = model.insert(&self.database).await.map_err(|err| {
            let err = EngineError::from(err);
            if err.is_unique_violation() {
                EngineError::ExistingKey(email.clone())
            } else {
                err
            }
        })?;
        tracing::info!("registered user {}", model.id);
        User::try_from(model)
    }

    /// Return the user matching the credentials, or `None` when they do not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<Option<User>> {
        let Ok(email) = normalize_email(email) else {
            return Ok(None);
        };
        let Some(model) = self.find_user_by_email(&email).await? else {
            return Ok(None);
        };
        if !bcrypt::verify(password, &model.password_hash)? {
            return Ok(None);
        }
        User::try_from(model).map(Some)
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
        User::try_from(model)
    }

    /// Update first name, last name and currency; blank values keep the stored ones.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> ResultEngine<User> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

        let mut active: users::ActiveModel = model.into();
        if let Some(first_name) = normalize_optional_text(changes.first_name.as_deref()) {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = normalize_optional_text(changes.last_name.as_deref()) {
            active.last_name = ActiveValue::Set(last_name);
        }
        if let Some(currency) = changes.currency {
            active.currency = ActiveValue::Set(currency.code().to_string());
        }

        let model = active.update(&self.database).await?;
        User::try_from(model)
    }

    /// Register `new_user` unless its email already exists, returning the stored user.
    pub async fn ensure_user(&self, new_user: NewUser) -> ResultEngine<User> {
        let email = normalize_email(&new_user.email)?;
        if let Some(model) = self.find_user_by_email(&email).await? {
            return User::try_from(model);
        }
        match self.register_user(new_user).await {
            Err(EngineError::ExistingKey(_)) => {
                let model = self
                    .find_user_by_email(&email)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
                User::try_from(model)
            }
            other => other,
        }
    }

    async fn find_user_by_email(&self, email: &str) -> ResultEngine<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?)
    }
}
