use serde_json::json;

use crate::common::{TestApp, routes, tag_names};

mod data_creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_tags_in_given_order() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::DATA,
                &json!({
                    "title": "Test Data",
                    "description": "This is test data",
                    "content": {"key": "value"},
                    "tags": ["test", "example"],
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Test Data");
        assert_eq!(res.body["content"]["key"], "value");
        assert_eq!(tag_names(&res.body), ["test", "example"]);
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn repeated_tag_names_link_once() {
        let app = TestApp::spawn().await;
        let id = app
            .create_data_item("Dupes", None, &["b", "a", "b", "a"])
            .await;

        let res = app.get(&routes::data_item(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(tag_names(&res.body), ["b", "a"]);
    }

    #[tokio::test]
    async fn shared_tag_names_reuse_the_same_tag() {
        let app = TestApp::spawn().await;
        let first = app.create_data_item("One", None, &["shared"]).await;
        let second = app.create_data_item("Two", None, &["shared"]).await;

        let a = app.get(&routes::data_item(first)).await;
        let b = app.get(&routes::data_item(second)).await;
        assert_eq!(a.body["tags"][0]["id"], b.body["tags"][0]["id"]);

        let tags = app.get(routes::DATA_TAGS).await;
        assert_eq!(tags.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::DATA, &json!({"content": {"key": "value"}}))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::DATA, &json!({"title": "   ", "content": {}}))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn non_object_content_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::DATA, &json!({"title": "x", "content": "text"}))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod data_update {
    use super::*;

    #[tokio::test]
    async fn replacing_tags_keeps_old_tags_in_store() {
        let app = TestApp::spawn().await;
        let id = app
            .create_data_item("Test Data", Some("This is test data"), &["test", "example"])
            .await;

        let res = app
            .put(
                &routes::data_item(id),
                &json!({"title": "Updated Data", "tags": ["updated", "new"]}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Updated Data");
        assert_eq!(res.body["description"], "This is test data");
        assert_eq!(tag_names(&res.body), ["updated", "new"]);

        let tags = app.get(routes::DATA_TAGS).await;
        let names: Vec<&str> = tags
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        for name in ["test", "example", "updated", "new"] {
            assert!(names.contains(&name), "tag {name} missing from {names:?}");
        }
    }

    #[tokio::test]
    async fn update_without_tags_leaves_tags_alone() {
        let app = TestApp::spawn().await;
        let id = app.create_data_item("Item", None, &["keep", "these"]).await;

        let res = app
            .put(&routes::data_item(id), &json!({"content": {"v": 2}}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["content"]["v"], 2);
        assert_eq!(tag_names(&res.body), ["keep", "these"]);
    }

    #[tokio::test]
    async fn empty_tag_list_clears_tags() {
        let app = TestApp::spawn().await;
        let id = app.create_data_item("Item", None, &["gone"]).await;

        let res = app.put(&routes::data_item(id), &json!({"tags": []})).await;
        assert_eq!(res.status, 200);
        assert!(tag_names(&res.body).is_empty());
    }

    #[tokio::test]
    async fn null_description_clears_it() {
        let app = TestApp::spawn().await;
        let id = app.create_data_item("Item", Some("desc"), &[]).await;

        let res = app
            .put(&routes::data_item(id), &json!({"description": null}))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body["description"].is_null());
    }

    #[tokio::test]
    async fn empty_update_returns_item_unchanged() {
        let app = TestApp::spawn().await;
        let id = app.create_data_item("Item", Some("desc"), &["t"]).await;

        let res = app.put(&routes::data_item(id), &json!({})).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Item");
        assert_eq!(tag_names(&res.body), ["t"]);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::data_item(999), &json!({"title": "x"}))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod data_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_removes_item_but_not_tags() {
        let app = TestApp::spawn().await;
        let id = app.create_data_item("Item", None, &["survivor"]).await;

        let res = app.delete(&routes::data_item(id)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::data_item(id)).await;
        assert_eq!(res.status, 404);

        let tags = app.get(routes::DATA_TAGS).await;
        assert_eq!(tags.body[0]["name"], "survivor");
    }

    #[tokio::test]
    async fn delete_missing_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::data_item(42)).await;
        assert_eq!(res.status, 404);
    }
}

mod data_listing {
    use super::*;

    #[tokio::test]
    async fn pagination_metadata_follows_skip_and_limit() {
        let app = TestApp::spawn().await;
        for i in 0..5 {
            app.create_data_item(&format!("Item {i}"), None, &[]).await;
        }

        let res = app.get(&routes::data_list("skip=2&limit=2")).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 5);
        assert_eq!(res.body["page"], 2);
        assert_eq!(res.body["page_size"], 2);
        assert_eq!(res.body["total_pages"], 3);

        let titles: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Item 2", "Item 3"]);
    }

    #[tokio::test]
    async fn zero_limit_reports_single_page() {
        let app = TestApp::spawn().await;
        app.create_data_item("Item", None, &[]).await;

        let res = app.get(&routes::data_list("limit=0")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 1);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["total_pages"], 1);
        assert!(res.body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn tag_filter_is_exact_match() {
        let app = TestApp::spawn().await;
        app.create_data_item("Tagged", None, &["tag"]).await;
        app.create_data_item("Tagging", None, &["tagging"]).await;

        let res = app.get(&routes::data_list("tag=tag")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 1);
        assert_eq!(res.body["data"][0]["title"], "Tagged");
        assert_eq!(tag_names(&res.body["data"][0]), ["tag"]);
    }

    #[tokio::test]
    async fn unknown_tag_yields_empty_page() {
        let app = TestApp::spawn().await;
        app.create_data_item("Item", None, &["a"]).await;

        let res = app.get(&routes::data_list("tag=nope")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 0);
        assert!(res.body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_skip_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::data_list("skip=-1")).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn skip_beyond_sql_integer_range_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_data_item("Only", None, &[]).await;

        let res = app
            .get(&routes::data_list("skip=18446744073709551615&limit=1"))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .get(&routes::data_search("q=only&limit=9223372036854775808"))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app.get(&format!("{}?skip=9223372036854775808", routes::PROJECTS)).await;
        assert_eq!(res.status, 400, "{}", res.text);

        let res = app.get(&routes::data_list("skip=9223372036854775807&limit=1")).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["data"].as_array().unwrap().is_empty());
    }
}

mod data_search {
    use super::*;

    #[tokio::test]
    async fn search_is_case_insensitive_over_title_and_description() {
        let app = TestApp::spawn().await;
        app.create_data_item("Rust Notes", None, &[]).await;
        app.create_data_item("Misc", Some("all about RUST"), &[]).await;
        app.create_data_item("Other", Some("nothing here"), &[]).await;

        let res = app.get(&routes::data_search("q=rust")).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 2);
        let titles: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Rust Notes", "Misc"]);
    }

    #[tokio::test]
    async fn wildcards_match_literally() {
        let app = TestApp::spawn().await;
        app.create_data_item("100% done", None, &[]).await;
        app.create_data_item("1000 done", None, &[]).await;

        let res = app.get(&routes::data_search("q=0%25")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 1);
        assert_eq!(res.body["data"][0]["title"], "100% done");

        let res = app.get(&routes::data_search("q=_")).await;
        assert_eq!(res.body["total"], 0);
    }

    #[tokio::test]
    async fn search_without_query_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::data_search("limit=10")).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
