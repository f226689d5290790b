use chrono::Utc;
use common::{ColorScheme, DesignConfig};
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionSession, TransactionTrait,
};
use tracing::info;

use crate::entity::design_system;
use crate::models::design::{CreateDesignRequest, UpdateDesignRequest};

/// Failure modes of registry operations.
#[derive(Debug)]
pub enum RegistryError {
    /// No design system has this id.
    NotFound(i32),
    /// The operation needs an active design system and there is none.
    NoActiveTheme,
    /// Another design system already uses this name.
    DuplicateName(String),
    /// The active design system cannot be deleted.
    ActiveDelete(i32),
    Db(DbErr),
}

impl From<DbErr> for RegistryError {
    fn from(err: DbErr) -> Self {
        RegistryError::Db(err)
    }
}

/// Named theme configurations with a single active theme.
///
/// Every write runs in one transaction opened on `conn`. Operations that
/// touch the active flag lock all rows in id order first, so concurrent
/// activations serialize instead of leaving two themes active.
pub struct DesignRegistry<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> DesignRegistry<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<design_system::Model>, DbErr> {
        design_system::Entity::find()
            .order_by_asc(design_system::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.conn)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<design_system::Model>, DbErr> {
        design_system::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn get_active(&self) -> Result<Option<design_system::Model>, DbErr> {
        design_system::Entity::find()
            .filter(design_system::Column::IsActive.eq(true))
            .order_by_asc(design_system::Column::Id)
            .one(self.conn)
            .await
    }

    /// Configuration of the active theme, or `default` when none is active.
    pub async fn current_config(&self, default: &DesignConfig) -> Result<DesignConfig, DbErr> {
        Ok(self
            .get_active()
            .await?
            .map(|m| m.config)
            .unwrap_or_else(|| default.clone()))
    }

    pub async fn color_scheme(&self, default: &DesignConfig) -> Result<ColorScheme, DbErr> {
        Ok(self.current_config(default).await?.colors)
    }

    /// Insert a new design system. It is inactive unless `activate` is set, in
    /// which case it replaces the current active theme in the same transaction.
    pub async fn create(
        &self,
        req: CreateDesignRequest,
    ) -> Result<design_system::Model, RegistryError> {
        let name = req.name.trim().to_string();
        let txn = self.conn.begin().await?;
        reserve_writes(&txn).await?;

        if name_taken(&txn, &name, None).await? {
            return Err(RegistryError::DuplicateName(name));
        }
        if req.activate {
            deactivate_all_except(&txn, None).await?;
        }

        let now = Utc::now();
        let model = design_system::ActiveModel {
            name: Set(name.clone()),
            config: Set(req.config),
            is_active: Set(req.activate),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| duplicate_or_db(e, &name))?;
        txn.commit().await?;

        info!(design_id = model.id, name = %model.name, active = model.is_active, "Created design system");
        Ok(model)
    }

    /// Make `id` the only active design system. Fails with `NotFound` before
    /// touching any row when `id` does not exist.
    pub async fn set_active(&self, id: i32) -> Result<design_system::Model, RegistryError> {
        let txn = self.conn.begin().await?;
        reserve_writes(&txn).await?;

        let Some(target) = lock_all(&txn).await?.into_iter().find(|m| m.id == id) else {
            return Err(RegistryError::NotFound(id));
        };

        deactivate_all_except(&txn, Some(id)).await?;
        let mut active: design_system::ActiveModel = target.into();
        active.is_active = Set(true);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;
        txn.commit().await?;

        info!(design_id = id, name = %model.name, "Activated design system");
        Ok(model)
    }

    /// Replace every configuration section present in `req`, and rename when
    /// `name` is given.
    pub async fn update(
        &self,
        id: i32,
        req: UpdateDesignRequest,
    ) -> Result<design_system::Model, RegistryError> {
        let txn = self.conn.begin().await?;
        reserve_writes(&txn).await?;

        let Some(existing) = design_system::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Err(RegistryError::NotFound(id));
        };

        let name = match req.name {
            Some(name) => name.trim().to_string(),
            None => existing.name.clone(),
        };
        if name != existing.name && name_taken(&txn, &name, Some(id)).await? {
            return Err(RegistryError::DuplicateName(name));
        }

        let mut config = existing.config.clone();
        config.apply(req.patch);

        let mut active: design_system::ActiveModel = existing.into();
        active.name = Set(name.clone());
        active.config = Set(config);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&txn)
            .await
            .map_err(|e| duplicate_or_db(e, &name))?;
        txn.commit().await?;

        Ok(model)
    }

    /// Delete an inactive design system.
    pub async fn delete(&self, id: i32) -> Result<(), RegistryError> {
        let txn = self.conn.begin().await?;
        reserve_writes(&txn).await?;

        let Some(existing) = design_system::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Err(RegistryError::NotFound(id));
        };
        if existing.is_active {
            return Err(RegistryError::ActiveDelete(id));
        }

        design_system::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(design_id = id, name = %existing.name, "Deleted design system");
        Ok(())
    }

    /// Replace the `colors` section of the active design system.
    pub async fn update_color_scheme(
        &self,
        colors: ColorScheme,
    ) -> Result<design_system::Model, RegistryError> {
        let txn = self.conn.begin().await?;
        reserve_writes(&txn).await?;

        let Some(current) = design_system::Entity::find()
            .filter(design_system::Column::IsActive.eq(true))
            .order_by_asc(design_system::Column::Id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Err(RegistryError::NoActiveTheme);
        };

        let mut config = current.config.clone();
        config.colors = colors;
        let mut active: design_system::ActiveModel = current.into();
        active.config = Set(config);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }
}

/// Take the write lock before the first read. SQLite ignores `FOR UPDATE` and
/// fails a read-then-write transaction with `SQLITE_BUSY` rather than waiting.
async fn reserve_writes<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    design_system::Entity::update_many()
        .col_expr(design_system::Column::IsActive, Expr::col(design_system::Column::IsActive))
        .filter(design_system::Column::Id.lt(0))
        .exec(conn)
        .await?;
    Ok(())
}

async fn lock_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<design_system::Model>, DbErr> {
    design_system::Entity::find()
        .order_by_asc(design_system::Column::Id)
        .lock(LockType::Update)
        .all(conn)
        .await
}

async fn deactivate_all_except<C: ConnectionTrait>(conn: &C, keep: Option<i32>) -> Result<(), DbErr> {
    let mut update = design_system::Entity::update_many()
        .col_expr(design_system::Column::IsActive, Expr::value(false))
        .filter(design_system::Column::IsActive.eq(true));
    if let Some(id) = keep {
        update = update.filter(design_system::Column::Id.ne(id));
    }
    update.exec(conn).await?;
    Ok(())
}

async fn name_taken<C: ConnectionTrait>(conn: &C, name: &str, except: Option<i32>) -> Result<bool, DbErr> {
    let mut select = design_system::Entity::find().filter(design_system::Column::Name.eq(name));
    if let Some(id) = except {
        select = select.filter(design_system::Column::Id.ne(id));
    }
    Ok(select.one(conn).await?.is_some())
}

fn duplicate_or_db(err: DbErr, name: &str) -> RegistryError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        RegistryError::DuplicateName(name.to_string())
    } else {
        RegistryError::Db(err)
    }
}
