#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `/api/authors` end to end, including the query-parameter rejections.

use axum::http::{StatusCode, header};
use serde_json::json;

mod support;
use support::{TestApp, keys};

#[tokio::test]
async fn test_list_returns_data_root_with_default_fields() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.items().len(), 3);
    for item in resp.items() {
        assert_eq!(
            keys(item),
            ["id", "given_name", "family_name", "created_at", "updated_at"]
        );
    }
    assert!(resp.link().is_none());
}

#[tokio::test]
async fn test_field_picking_keeps_requested_order() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?fields=id,given_name,family_name").await;
    assert_eq!(resp.status, StatusCode::OK);
    for item in resp.items() {
        assert_eq!(keys(item), ["id", "given_name", "family_name"]);
    }

    let resp = app.get("/api/authors?fields=family_name,id").await;
    assert_eq!(keys(&resp.items()[0]), ["family_name", "id"]);
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?fields=fid,given_name").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "fields=fid");
}

#[tokio::test]
async fn test_pagination_and_link_header() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?page=1&per=2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.items().len(), 2);
    assert_eq!(
        resp.link().unwrap(),
        "<http://www.example.com/api/authors?page=2&per=2>; rel=\"next\", \
         <http://www.example.com/api/authors?page=2&per=2>; rel=\"last\""
    );

    let resp = app.get("/api/authors?page=2&per=2").await;
    assert_eq!(resp.items().len(), 1);
    assert_eq!(
        resp.link().unwrap(),
        "<http://www.example.com/api/authors?page=1&per=2>; rel=\"first\", \
         <http://www.example.com/api/authors?page=1&per=2>; rel=\"prev\""
    );
}

#[tokio::test]
async fn test_link_keeps_other_params() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app
        .get("/api/authors?per=1&q[given_name_start]=Pat&fields=id")
        .await;
    assert_eq!(resp.items().len(), 1);
    let first = resp.link().unwrap().split(", ").next().unwrap().to_owned();
    assert_eq!(
        first,
        "<http://www.example.com/api/authors?per=1&q%5Bgiven_name_start%5D=Pat&fields=id&page=2>; rel=\"next\""
    );
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?page=9&per=2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.items().is_empty());
    assert!(resp.link().unwrap().contains("rel=\"prev\""));
}

#[tokio::test]
async fn test_page_offset_out_of_range() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?page=18446744073709551615&per=10").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "page=18446744073709551615");

    let resp = app.get("/api/authors?page=100000000000000000&per=100").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "page=100000000000000000");

    let resp = app.get("/api/authors?page=1000000&per=100").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.items().is_empty());
}

#[tokio::test]
async fn test_invalid_page() {
    let app = TestApp::new().await;

    let resp = app.get("/api/authors?page=fake&per=10").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "page=fake");

    let resp = app.get("/api/authors?per=0").await;
    assert_eq!(resp.invalid_params(), "per=0");
}

#[tokio::test]
async fn test_sorting() {
    let app = TestApp::new().await;
    let [pat, brandon, patricia] = app.three_authors().await;

    let resp = app.get("/api/authors?sort=id&dir=desc").await;
    assert_eq!(resp.ids(), [patricia, brandon, pat]);

    let resp = app.get("/api/authors?sort=given_name").await;
    assert_eq!(resp.ids(), [brandon, pat, patricia]);

    let resp = app.get("/api/authors?sort=fid&dir=desc").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "sort=fid");

    let resp = app.get("/api/authors?sort=id&dir=sideways").await;
    assert_eq!(resp.invalid_params(), "dir=sideways");
}

#[tokio::test]
async fn test_filtering() {
    let app = TestApp::new().await;
    let [pat, _, patricia] = app.three_authors().await;

    let resp = app.get("/api/authors?q[given_name_cont]=Pat").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.ids(), [pat, patricia]);

    let resp = app.get("/api/authors?q[given_name_cont]=pat").await;
    assert_eq!(resp.ids(), [pat, patricia], "matching ignores case");

    let resp = app
        .get("/api/authors?q[given_name_cont]=Pat&q[family_name_eq]=Briggs")
        .await;
    assert_eq!(resp.ids(), [patricia]);

    let resp = app.get(&format!("/api/authors?q[id_in]={pat},{patricia}")).await;
    assert_eq!(resp.ids(), [pat, patricia]);
}

#[tokio::test]
async fn test_invalid_filters() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?q[fgiven_name_cont]=Pat").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "q[fgiven_name_cont]=Pat");

    let resp = app.get("/api/authors?q[given_name_like]=Pat").await;
    assert_eq!(resp.invalid_params(), "q[given_name_like]=Pat");

    let resp = app.get("/api/authors?q[id_gt]=abc").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.invalid_params(), "q[id_gt]=abc");
}

#[tokio::test]
async fn test_filtered_count_drives_pagination() {
    let app = TestApp::new().await;
    app.three_authors().await;

    let resp = app.get("/api/authors?q[given_name_start]=Pat&per=1").await;
    assert_eq!(resp.items().len(), 1);
    let link = resp.link().unwrap();
    assert!(link.contains("page=2>; rel=\"last\""), "{link}");
}

#[tokio::test]
async fn test_embed_and_include_books() {
    let app = TestApp::new().await;
    let [pat, brandon, _] = app.three_authors().await;
    let first = app.book("The Name of the Wind", pat, None).await;
    let second = app.book("The Wise Man's Fear", pat, None).await;

    let resp = app.get("/api/authors?embed=books&fields=id,given_name").await;
    assert_eq!(resp.status, StatusCode::OK);
    let items = resp.items();
    assert_eq!(keys(&items[0]), ["id", "given_name", "books"]);
    let books: Vec<i64> = items[0]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(books, [first, second]);
    assert_eq!(items[0]["books"][0]["title"], "The Name of the Wind");
    assert_eq!(items[1]["id"], brandon);
    assert_eq!(items[1]["books"], json!([]));

    let resp = app.get("/api/authors?include=books").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.items()[0].get("books").is_none(), "include does not change the shape");

    let resp = app.get("/api/authors?embed=bookz").await;
    assert_eq!(resp.invalid_params(), "embed=bookz");
}

#[tokio::test]
async fn test_show() {
    let app = TestApp::new().await;
    let [pat, ..] = app.three_authors().await;
    app.book("The Name of the Wind", pat, None).await;

    let resp = app.get(&format!("/api/authors/{pat}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["given_name"], "Pat");
    assert_eq!(resp.data()["family_name"], "Rothfuss");

    let resp = app
        .get(&format!("/api/authors/{pat}?fields=family_name&embed=books"))
        .await;
    assert_eq!(keys(resp.data()), ["family_name", "books"]);
    assert_eq!(resp.data()["books"].as_array().unwrap().len(), 1);

    let resp = app.get(&format!("/api/authors/{pat}?fields=fid")).await;
    assert_eq!(resp.invalid_params(), "fields=fid");
}

#[tokio::test]
async fn test_show_missing() {
    let app = TestApp::new().await;

    let resp = app.get("/api/authors/581832481").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"error": {"message": "Not Found"}}));

    let resp = app.get("/api/authors/not-a-number").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create() {
    let app = TestApp::new().await;

    let resp = app
        .post(
            "/api/authors",
            &json!({"data": {"given_name": "Michael", "family_name": "Hartl"}}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.data()["id"].as_i64().unwrap();
    assert_eq!(resp.data()["given_name"], "Michael");
    assert_eq!(
        resp.header(header::LOCATION),
        Some(format!("http://www.example.com/api/authors/{id}").as_str())
    );

    let resp = app.get(&format!("/api/authors/{id}")).await;
    assert_eq!(resp.data()["family_name"], "Hartl");
}

#[tokio::test]
async fn test_create_invalid() {
    let app = TestApp::new().await;

    let resp = app
        .post("/api/authors", &json!({"data": {"given_name": ""}}))
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.body,
        json!({"error": {"invalid_params": {
            "family_name": ["can't be blank"],
            "given_name": ["can't be blank"]
        }}})
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::new().await;

    let resp = app
        .post("/api/authors", &json!({"given_name": "No envelope"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_update() {
    let app = TestApp::new().await;
    let [pat, ..] = app.three_authors().await;

    let resp = app
        .patch(
            &format!("/api/authors/{pat}"),
            &json!({"data": {"given_name": "Patrick"}}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["given_name"], "Patrick");
    assert_eq!(resp.data()["family_name"], "Rothfuss");

    let resp = app
        .patch(
            &format!("/api/authors/{pat}"),
            &json!({"data": {"family_name": " "}}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.invalid_params(),
        &json!({"family_name": ["can't be blank"]})
    );

    let resp = app
        .patch("/api/authors/581832481", &json!({"data": {"given_name": "X"}}))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let [pat, brandon, _] = app.three_authors().await;
    app.book("The Name of the Wind", pat, None).await;

    let resp = app.delete(&format!("/api/authors/{brandon}")).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get(&format!("/api/authors/{brandon}")).await.status,
        StatusCode::NOT_FOUND
    );

    let resp = app.delete(&format!("/api/authors/{pat}")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.invalid_params(),
        &json!({"base": ["cannot delete record with dependent books"]})
    );

    let resp = app.delete("/api/authors/581832481").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let resp = app.get("/api/shelves").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["error"]["message"], "Not Found");
}
