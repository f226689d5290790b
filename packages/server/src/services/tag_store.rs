use std::collections::{HashMap, HashSet};

use chrono::Utc;
use common::PageWindow;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, OnConflict, Query as SeaQuery};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionSession,
    TransactionTrait, sea_query::LockType,
};
use tracing::info;

use crate::entity::{data_item, data_tag, tag};
use crate::models::data::{CreateDataItemRequest, UpdateDataItemRequest};
use crate::models::shared::escape_like;

/// A data item together with its tags in association order.
#[derive(Debug, Clone)]
pub struct DataItemRecord {
    pub item: data_item::Model,
    pub tags: Vec<tag::Model>,
}

/// One page of data items plus the unpaged match count.
#[derive(Debug, Clone)]
pub struct DataItemPage {
    pub items: Vec<DataItemRecord>,
    pub total: u64,
    pub window: PageWindow,
}

/// Tag de-duplication, data item persistence and search.
///
/// Write operations open their own transaction on `conn`. When `conn` is
/// already a transaction this becomes a savepoint.
pub struct TagStore<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> TagStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Look up a tag by exact name, inserting it first if absent.
    ///
    /// The insert is `ON CONFLICT (name) DO NOTHING`, so concurrent callers
    /// with the same name all end up with the single stored row.
    pub async fn get_or_create_tag(&self, name: &str) -> Result<tag::Model, DbErr> {
        let model = tag::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        match tag::Entity::insert(model)
            .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
            .exec_without_returning(self.conn)
            .await
        {
            Ok(rows) if rows > 0 => info!(tag = name, "Created tag"),
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }

        tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("tag {name:?} vanished after insert")))
    }

    pub async fn list_tags(&self) -> Result<Vec<tag::Model>, DbErr> {
        tag::Entity::find()
            .order_by_asc(tag::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn create_data_item(
        &self,
        req: CreateDataItemRequest,
    ) -> Result<DataItemRecord, DbErr> {
        let txn = self.conn.begin().await?;
        let store = TagStore::new(&txn);

        let now = Utc::now();
        let item = data_item::ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            content: Set(req.content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let tags = store.attach_tags(item.id, &req.tags).await?;
        txn.commit().await?;

        info!(data_item_id = item.id, tags = tags.len(), "Created data item");
        Ok(DataItemRecord { item, tags })
    }

    pub async fn get_data_item(&self, id: i32) -> Result<Option<DataItemRecord>, DbErr> {
        let Some(item) = data_item::Entity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };
        let tags = self.tags_of(id).await?;
        Ok(Some(DataItemRecord { item, tags }))
    }

    /// Apply the fields present in `req`. A present `tags` list replaces the
    /// item's associations; an absent one leaves them alone.
    ///
    /// Returns `None` when no item has this id.
    pub async fn update_data_item(
        &self,
        id: i32,
        req: UpdateDataItemRequest,
    ) -> Result<Option<DataItemRecord>, DbErr> {
        let txn = self.conn.begin().await?;
        let store = TagStore::new(&txn);

        let Some(existing) = data_item::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: data_item::ActiveModel = existing.into();
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }
        active.updated_at = Set(Utc::now());
        let item = active.update(&txn).await?;

        let tags = match req.tags {
            Some(names) => {
                data_tag::Entity::delete_many()
                    .filter(data_tag::Column::DataItemId.eq(id))
                    .exec(&txn)
                    .await?;
                store.attach_tags(id, &names).await?
            }
            None => store.tags_of(id).await?,
        };
        txn.commit().await?;

        Ok(Some(DataItemRecord { item, tags }))
    }

    /// Remove an item and its associations. Tags are never deleted.
    ///
    /// Returns `false` when no item has this id.
    pub async fn delete_data_item(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.conn.begin().await?;

        if data_item::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        data_tag::Entity::delete_many()
            .filter(data_tag::Column::DataItemId.eq(id))
            .exec(&txn)
            .await?;
        data_item::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(data_item_id = id, "Deleted data item");
        Ok(true)
    }

    /// Page through items in id order, optionally restricted to those carrying
    /// a tag named exactly `tag`.
    pub async fn list_data_items(
        &self,
        skip: u64,
        limit: u64,
        tag: Option<&str>,
    ) -> Result<DataItemPage, DbErr> {
        let mut select = data_item::Entity::find();
        if let Some(name) = tag {
            select = select.filter(
                data_item::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(data_tag::Column::DataItemId)
                        .from(data_tag::Entity)
                        .and_where(
                            data_tag::Column::TagId.in_subquery(
                                SeaQuery::select()
                                    .column(tag::Column::Id)
                                    .from(tag::Entity)
                                    .and_where(tag::Column::Name.eq(name))
                                    .to_owned(),
                            ),
                        )
                        .to_owned(),
                ),
            );
        }
        self.page(select, skip, limit).await
    }

    /// Case-insensitive literal substring match on title or description.
    pub async fn search_data_items(
        &self,
        query: &str,
        skip: u64,
        limit: u64,
    ) -> Result<DataItemPage, DbErr> {
        let pattern = format!("%{}%", escape_like(query).to_lowercase());
        let select = data_item::Entity::find().filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(data_item::Column::Title)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(data_item::Column::Description)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                ),
        );
        self.page(select, skip, limit).await
    }

    async fn page(
        &self,
        select: Select<data_item::Entity>,
        skip: u64,
        limit: u64,
    ) -> Result<DataItemPage, DbErr> {
        let total = select.clone().count(self.conn).await?;
        let items = select
            .order_by_asc(data_item::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.conn)
            .await?;

        let ids: Vec<i32> = items.iter().map(|m| m.id).collect();
        let mut tags_by_item = self.tags_of_many(&ids).await?;
        let items = items
            .into_iter()
            .map(|item| {
                let tags = tags_by_item.remove(&item.id).unwrap_or_default();
                DataItemRecord { item, tags }
            })
            .collect();

        Ok(DataItemPage {
            items,
            total,
            window: PageWindow::new(total, skip, limit),
        })
    }

    /// Resolve `names` and link them to `item_id` in first-occurrence order.
    async fn attach_tags(&self, item_id: i32, names: &[String]) -> Result<Vec<tag::Model>, DbErr> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for name in names.iter().map(|n| n.trim()) {
            if !seen.insert(name) {
                continue;
            }
            tags.push(self.get_or_create_tag(name).await?);
        }

        if tags.is_empty() {
            return Ok(tags);
        }

        let links = tags.iter().enumerate().map(|(position, tag)| data_tag::ActiveModel {
            data_item_id: Set(item_id),
            tag_id: Set(tag.id),
            position: Set(position as i32),
            ..Default::default()
        });
        data_tag::Entity::insert_many(links)
            .exec_without_returning(self.conn)
            .await?;

        Ok(tags)
    }

    async fn tags_of(&self, item_id: i32) -> Result<Vec<tag::Model>, DbErr> {
        Ok(self
            .tags_of_many(&[item_id])
            .await?
            .remove(&item_id)
            .unwrap_or_default())
    }

    async fn tags_of_many(&self, item_ids: &[i32]) -> Result<HashMap<i32, Vec<tag::Model>>, DbErr> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = data_tag::Entity::find()
            .filter(data_tag::Column::DataItemId.is_in(item_ids.iter().copied()))
            .order_by_asc(data_tag::Column::DataItemId)
            .order_by_asc(data_tag::Column::Position)
            .all(self.conn)
            .await?;

        let tag_ids: HashSet<i32> = links.iter().map(|l| l.tag_id).collect();
        let tags: HashMap<i32, tag::Model> = tag::Entity::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let mut grouped: HashMap<i32, Vec<tag::Model>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags.get(&link.tag_id) {
                grouped
                    .entry(link.data_item_id)
                    .or_default()
                    .push(tag.clone());
            }
        }
        Ok(grouped)
    }
}
