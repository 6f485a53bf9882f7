//! Database operations for user accounts.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Related, Select, Set, SqlErr, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::entity::{
    certificate, email_verification, note, portfolio, profile, project, resume,
    user::{self, ActiveModel, Entity as UserEntity},
};
use crate::error::{AppError, AppResult};
use crate::models::{AccountStatus, NewUser, Role, StatusStats, UpdateUserRequest, User};

use super::DbPool;

/// Narrow a query over a user-owned table to rows of approved students.
pub(super) fn owned_by_approved_students<E>(query: Select<E>) -> Select<E>
where
    E: EntityTrait + Related<user::Entity>,
{
    query
        .inner_join(UserEntity)
        .filter(user::Column::Role.eq(Role::Student.as_str()))
        .filter(user::Column::AccountStatus.eq(AccountStatus::Approved.as_str()))
}

impl DbPool {
    /// Find a user by (already normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        result.map(model_to_user).transpose()
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        result.map(model_to_user).transpose()
    }

    pub async fn find_user_by_roll_no(&self, roll_no: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::RollNo.eq(roll_no))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        result.map(model_to_user).transpose()
    }

    /// Insert a new account. A unique-constraint race surfaces as `Duplicate`.
    pub async fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            full_name: Set(new_user.full_name),
            role: Set(new_user.role.as_str().to_string()),
            account_status: Set(new_user.status.as_str().to_string()),
            roll_no: Set(new_user.roll_no),
            department: Set(new_user.department),
            year_semester: Set(new_user.year_semester),
            designation: Set(new_user.designation),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(self.connection()).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Duplicate("Email or roll number already registered".to_string())
                }
                _ => AppError::Database(format!("Failed to insert user: {}", e)),
            }
        })?;

        model_to_user(inserted)
    }

    /// Apply a self-edit. Returns `None` when no account has this email.
    pub async fn update_user_profile(
        &self,
        email: &str,
        update: &UpdateUserRequest,
    ) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(name) = non_blank(update.name.as_deref()) {
            active.full_name = Set(name);
        }
        if let Some(department) = non_blank(update.department.as_deref()) {
            active.department = Set(Some(department));
        }
        if let Some(year_semester) = non_blank(update.year_semester.as_deref()) {
            active.year_semester = Set(Some(year_semester));
        }
        if let Some(designation) = non_blank(update.designation.as_deref()) {
            active.designation = Set(Some(designation));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update user: {}", e)))?;

        model_to_user(updated).map(Some)
    }

    /// Move an account from `from` to `to`, only while it is still in
    /// `from`. Returns `None` when the stored status no longer matches.
    pub async fn compare_and_set_status(
        &self,
        id: Uuid,
        from: AccountStatus,
        to: AccountStatus,
    ) -> AppResult<Option<User>> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::AccountStatus, Expr::value(to.as_str()))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::AccountStatus.eq(from.as_str()))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update account status: {}", e)))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_user_by_id(id).await
    }

    /// List users newest first, optionally filtered by status and role.
    pub async fn list_users(
        &self,
        status: Option<AccountStatus>,
        role: Option<Role>,
    ) -> AppResult<Vec<User>> {
        let mut select = UserEntity::find();

        if let Some(status) = status {
            select = select.filter(user::Column::AccountStatus.eq(status.as_str()));
        }
        if let Some(role) = role {
            select = select.filter(user::Column::Role.eq(role.as_str()));
        }

        let users = select
            .order_by_desc(user::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list users: {}", e)))?;

        users.into_iter().map(model_to_user).collect()
    }

    /// Approved students ordered by name.
    pub async fn list_approved_students(&self) -> AppResult<Vec<User>> {
        let users = UserEntity::find()
            .filter(user::Column::Role.eq(Role::Student.as_str()))
            .filter(user::Column::AccountStatus.eq(AccountStatus::Approved.as_str()))
            .order_by_asc(user::Column::FullName)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list students: {}", e)))?;

        users.into_iter().map(model_to_user).collect()
    }

    /// Count accounts in each status.
    pub async fn count_users_by_status(&self) -> AppResult<StatusStats> {
        let count = |status: AccountStatus| async move {
            UserEntity::find()
                .filter(user::Column::AccountStatus.eq(status.as_str()))
                .count(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to count users: {}", e)))
        };

        Ok(StatusStats {
            total_pending: count(AccountStatus::Pending).await?,
            total_approved: count(AccountStatus::Approved).await?,
            total_rejected: count(AccountStatus::Rejected).await?,
        })
    }

    /// Delete a user and every row they own in one transaction.
    ///
    /// Child tables also cascade on the foreign key; deleting them here
    /// keeps the behavior identical on databases with foreign keys off.
    pub async fn delete_user_cascade(&self, user: &User) -> AppResult<()> {
        let db_err = |e: DbErr| AppError::Database(format!("Failed to delete user: {}", e));
        let id = user.id;

        let txn = self.connection().begin().await.map_err(db_err)?;

        project::Entity::delete_many()
            .filter(project::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        certificate::Entity::delete_many()
            .filter(certificate::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        note::Entity::delete_many()
            .filter(note::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        resume::Entity::delete_many()
            .filter(resume::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        portfolio::Entity::delete_many()
            .filter(portfolio::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        profile::Entity::delete_many()
            .filter(profile::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        email_verification::Entity::delete_many()
            .filter(email_verification::Column::Email.eq(user.email.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn model_to_user(m: user::Model) -> AppResult<User> {
    let role = Role::parse(&m.role)
        .ok_or_else(|| AppError::Database(format!("User {} has unknown role '{}'", m.id, m.role)))?;
    let status = AccountStatus::parse(&m.account_status).ok_or_else(|| {
        AppError::Database(format!(
            "User {} has unknown status '{}'",
            m.id, m.account_status
        ))
    })?;

    Ok(User {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        full_name: m.full_name,
        role,
        status,
        roll_no: m.roll_no,
        department: m.department,
        year_semester: m.year_semester,
        designation: m.designation,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
