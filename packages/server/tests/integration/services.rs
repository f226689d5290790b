use std::collections::HashSet;

use common::DesignConfig;
use portfolio_server::models::data::{CreateDataItemRequest, UpdateDataItemRequest};
use portfolio_server::models::design::{CreateDesignRequest, UpdateDesignRequest};
use portfolio_server::services::{DesignRegistry, RegistryError, TagStore};
use serde_json::json;

use crate::common::TestApp;

fn new_item(title: &str, tags: &[&str]) -> CreateDataItemRequest {
    CreateDataItemRequest {
        title: title.to_string(),
        description: None,
        content: json!({}),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn new_design(name: &str) -> CreateDesignRequest {
    CreateDesignRequest {
        name: name.to_string(),
        config: DesignConfig::default(),
        activate: false,
    }
}

mod tag_store {
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let app = TestApp::spawn().await;
        let store = TagStore::new(&app.db);

        let a = store.get_or_create_tag("rust").await.unwrap();
        let b = store.get_or_create_tag("rust").await.unwrap();
        let c = store.get_or_create_tag("Rust").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.list_tags().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_yields_one_tag() {
        let app = TestApp::spawn().await;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = app.db.clone();
                tokio::spawn(async move { TagStore::new(&db).get_or_create_tag("race").await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().unwrap().id);
        }
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn update_without_tags_keeps_associations() {
        let app = TestApp::spawn().await;
        let store = TagStore::new(&app.db);
        let created = store
            .create_data_item(new_item("Item", &["x", "y"]))
            .await
            .unwrap();

        let updated = store
            .update_data_item(
                created.item.id,
                UpdateDataItemRequest {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.item.title, "Renamed");
        let names: Vec<_> = updated.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_item_existed() {
        let app = TestApp::spawn().await;
        let store = TagStore::new(&app.db);
        let created = store.create_data_item(new_item("Item", &["t"])).await.unwrap();

        assert!(store.delete_data_item(created.item.id).await.unwrap());
        assert!(!store.delete_data_item(created.item.id).await.unwrap());
        assert_eq!(store.list_tags().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn pagination_window_matches_totals() {
        let app = TestApp::spawn().await;
        let store = TagStore::new(&app.db);
        for i in 0..7 {
            store
                .create_data_item(new_item(&format!("Item {i}"), &["all"]))
                .await
                .unwrap();
        }

        for (skip, limit) in [(0, 3), (3, 3), (6, 3), (4, 10)] {
            let page = store.list_data_items(skip, limit, Some("all")).await.unwrap();
            assert_eq!(page.total, 7);
            assert_eq!(page.window.page, skip / limit + 1);
            assert_eq!(page.window.total_pages, 7u64.div_ceil(limit));
            assert_eq!(page.window.page_size, limit);
            assert!(page.items.len() as u64 <= limit);
        }
    }
}

mod design_registry {
    use super::*;

    #[tokio::test]
    async fn set_active_missing_changes_nothing() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        let theme = registry.create(new_design("A")).await.unwrap();
        registry.set_active(theme.id).await.unwrap();

        let err = registry.set_active(theme.id + 100).await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));

        let active = registry.get_active().await.unwrap().unwrap();
        assert_eq!(active.id, theme.id);
    }

    #[tokio::test]
    async fn exactly_one_active_after_activation() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        let a = registry.create(new_design("A")).await.unwrap();
        let b = registry.create(new_design("B")).await.unwrap();
        let c = registry.create(new_design("C")).await.unwrap();

        for target in [a.id, c.id, b.id] {
            registry.set_active(target).await.unwrap();
            let active: Vec<_> = registry
                .list(0, 10)
                .await
                .unwrap()
                .into_iter()
                .filter(|d| d.is_active)
                .map(|d| d.id)
                .collect();
            assert_eq!(active, [target]);
        }
    }

    #[tokio::test]
    async fn concurrent_activations_all_succeed() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(registry.create(new_design(name)).await.unwrap().id);
        }

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = app.db.clone();
                let id = ids[i % ids.len()];
                tokio::spawn(async move { DesignRegistry::new(&db).set_active(id).await })
            })
            .chain((0..2).map(|i| {
                let db = app.db.clone();
                tokio::spawn(async move {
                    DesignRegistry::new(&db)
                        .create(CreateDesignRequest {
                            activate: true,
                            ..new_design(&format!("Late {i}"))
                        })
                        .await
                })
            }))
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let active = registry
            .list(0, 20)
            .await
            .unwrap()
            .into_iter()
            .filter(|d| d.is_active)
            .count();
        assert_eq!(active, 1);
    }

    #[tokio::test]
    async fn delete_guards_active_and_missing() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        let theme = registry.create(new_design("Live")).await.unwrap();
        registry.set_active(theme.id).await.unwrap();

        assert!(matches!(
            registry.delete(theme.id).await,
            Err(RegistryError::ActiveDelete(_))
        ));
        assert!(matches!(
            registry.delete(theme.id + 1).await,
            Err(RegistryError::NotFound(_))
        ));
        assert!(registry.get(theme.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rename_collision_is_duplicate_name() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        registry.create(new_design("Taken")).await.unwrap();
        let mine = registry.create(new_design("Mine")).await.unwrap();

        let err = registry
            .update(
                mine.id,
                UpdateDesignRequest {
                    name: Some("Taken".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "Taken"));
    }

    #[tokio::test]
    async fn color_scheme_falls_back_to_default() {
        let app = TestApp::spawn().await;
        let registry = DesignRegistry::new(&app.db);
        let mut fallback = DesignConfig::default();
        fallback.colors.primary = "#123456".into();

        let colors = registry.color_scheme(&fallback).await.unwrap();
        assert_eq!(colors.primary, "#123456");

        assert!(matches!(
            registry.update_color_scheme(fallback.colors.clone()).await,
            Err(RegistryError::NoActiveTheme)
        ));
    }
}
