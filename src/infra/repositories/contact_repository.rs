//! Contact repository implementation with ownership scoping.
//!
//! Every query filters on `owner_user_id`. A row owned by someone else is
//! never read, written or reported.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, Select, Set, TransactionTrait,
};

use super::entities::contact::{self, ActiveModel, Entity as ContactEntity};
use crate::config::INITIAL_CONTACT_VERSION;
use crate::domain::{CallerId, Contact, ContactFields};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Contact repository trait for dependency injection.
///
/// All methods take the owner explicitly and only ever touch that
/// owner's rows.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List the owner's contacts in storage order
    async fn list_for_owner(&self, owner: &CallerId) -> AppResult<Vec<Contact>>;

    /// Find one of the owner's contacts by ID
    async fn find_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<Option<Contact>>;

    /// Check whether the owner has a contact with this ID
    async fn exists_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<bool>;

    /// Insert a new contact owned by `owner`
    async fn create(&self, owner: &CallerId, fields: ContactFields) -> AppResult<Contact>;

    /// Overwrite all fields of one of the owner's contacts.
    ///
    /// With `expected_version` the write only applies to that version.
    /// Returns `AppError::ConcurrencyConflict` when no row matched.
    async fn update(
        &self,
        id: i32,
        owner: &CallerId,
        fields: ContactFields,
        expected_version: Option<i32>,
    ) -> AppResult<Contact>;

    /// Remove one of the owner's contacts. Returns whether a row was removed.
    async fn delete_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<bool>;
}

/// SeaORM-backed contact repository
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn owned_by(owner: &CallerId) -> Select<ContactEntity> {
        ContactEntity::find().filter(contact::Column::OwnerUserId.eq(owner.as_str()))
    }

    /// Roll back, logging (not masking) a failed rollback.
    async fn abort(txn: DatabaseTransaction) {
        if let Err(rollback_err) = txn.rollback().await {
            tracing::error!("Transaction rollback failed: {}", rollback_err);
        }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn list_for_owner(&self, owner: &CallerId) -> AppResult<Vec<Contact>> {
        let models = Self::owned_by(owner)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn find_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<Option<Contact>> {
        let result = Self::owned_by(owner)
            .filter(contact::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Contact::from))
    }

    async fn exists_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<bool> {
        let count = Self::owned_by(owner)
            .filter(contact::Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(&self, owner: &CallerId, fields: ContactFields) -> AppResult<Contact> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(fields.name),
            phone: Set(fields.phone),
            email: Set(fields.email),
            owner_user_id: Set(owner.to_string()),
            version: Set(INITIAL_CONTACT_VERSION),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Contact::from(model))
    }

    async fn update(
        &self,
        id: i32,
        owner: &CallerId,
        fields: ContactFields,
        expected_version: Option<i32>,
    ) -> AppResult<Contact> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let mut statement = ContactEntity::update_many()
            .col_expr(contact::Column::Name, Expr::value(fields.name))
            .col_expr(contact::Column::Phone, Expr::value(fields.phone))
            .col_expr(contact::Column::Email, Expr::value(fields.email))
            .col_expr(contact::Column::OwnerUserId, Expr::value(owner.to_string()))
            .col_expr(
                contact::Column::Version,
                Expr::col(contact::Column::Version).add(1),
            )
            .col_expr(contact::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(contact::Column::Id.eq(id))
            .filter(contact::Column::OwnerUserId.eq(owner.as_str()));

        if let Some(version) = expected_version {
            statement = statement.filter(contact::Column::Version.eq(version));
        }

        let updated = statement.exec(&txn).await;
        let result = match updated {
            Ok(result) => result,
            Err(e) => {
                Self::abort(txn).await;
                return Err(e.into());
            }
        };

        if result.rows_affected == 0 {
            Self::abort(txn).await;
            return Err(AppError::ConcurrencyConflict);
        }

        let reloaded = Self::owned_by(owner)
            .filter(contact::Column::Id.eq(id))
            .one(&txn)
            .await;
        let model = match reloaded {
            Ok(Some(model)) => model,
            Ok(None) => {
                Self::abort(txn).await;
                return Err(AppError::ConcurrencyConflict);
            }
            Err(e) => {
                Self::abort(txn).await;
                return Err(e.into());
            }
        };

        txn.commit().await.map_err(AppError::from)?;
        Ok(Contact::from(model))
    }

    async fn delete_for_owner(&self, id: i32, owner: &CallerId) -> AppResult<bool> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let found = Self::owned_by(owner)
            .filter(contact::Column::Id.eq(id))
            .one(&txn)
            .await;
        let existing = match found {
            Ok(existing) => existing,
            Err(e) => {
                Self::abort(txn).await;
                return Err(e.into());
            }
        };

        let removed = match existing {
            Some(model) => {
                let deleted = ContactEntity::delete_by_id(model.id).exec(&txn).await;
                match deleted {
                    Ok(result) => result.rows_affected > 0,
                    Err(e) => {
                        Self::abort(txn).await;
                        return Err(e.into());
                    }
                }
            }
            None => false,
        };

        // Commit even when nothing was found
        txn.commit().await.map_err(AppError::from)?;
        Ok(removed)
    }
}
