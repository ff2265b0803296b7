//! End-to-end browsing against the in-memory transport.

use std::rc::Rc;

use serde_json::json;
use triox_core::mock::{MockTransport, RecordedBody};
use triox_core::{
    ApiConfig, Explorer, Intent, Method, Outcome, PathStack, RefreshOutcome, StaticToken,
    entry_rows,
};

type TestExplorer = Explorer<Rc<MockTransport>, StaticToken>;

fn setup() -> (Rc<MockTransport>, TestExplorer) {
    let mock = Rc::new(MockTransport::new());
    mock.respond_json(
        Method::Get,
        "/app/files/list?path=",
        200,
        json!({ "files": [], "directories": [{ "name": "docs" }] }),
    );
    mock.respond_json(
        Method::Get,
        "/app/files/list?path=docs",
        200,
        json!({ "files": [], "directories": [{ "name": "2024" }] }),
    );
    mock.respond_json(
        Method::Get,
        "/app/files/list?path=docs/2024",
        200,
        json!({
            "files": [{ "name": "report.pdf", "size": 1500, "last_modified": 0 }],
            "directories": []
        }),
    );

    let explorer = Explorer::new(
        Rc::clone(&mock),
        StaticToken("secret".to_string()),
        ApiConfig::default(),
    );
    (mock, explorer)
}

#[tokio::test]
async fn browse_into_nested_directory_and_back() {
    let (mock, explorer) = setup();

    explorer.refresh().await.unwrap();
    explorer.handle(Intent::EnterDirectory("docs".into())).await.unwrap();
    explorer.handle(Intent::EnterDirectory("2024".into())).await.unwrap();

    let session = explorer.session();
    assert_eq!(session.trail().labels(), vec!["Home", "docs", "2024"]);
    let rows = entry_rows(session.snapshot().unwrap());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].size, "1.5 KB");
    assert_eq!(rows[0].modified, "never");

    // Clicking the "docs" crumb
    let depth = session.trail().get(1).and_then(|c| c.action()).unwrap();
    let outcome = explorer.handle(Intent::JumpToDepth(depth)).await.unwrap();
    assert_eq!(outcome, Outcome::Refreshed(RefreshOutcome::Applied));
    assert_eq!(explorer.location().serialize(), "docs");

    explorer.handle(Intent::GoUp).await.unwrap();
    assert!(explorer.location().is_root());

    assert_eq!(
        mock.urls(),
        vec![
            "/app/files/list?path=",
            "/app/files/list?path=docs",
            "/app/files/list?path=docs/2024",
            "/app/files/list?path=docs",
            "/app/files/list?path=",
        ]
    );
}

#[tokio::test]
async fn every_request_carries_the_token() {
    let (mock, explorer) = setup();
    mock.respond(Method::Get, "/app/files/create_dir?path=docs/new", 200, "");

    explorer.refresh().await.unwrap();
    explorer.handle(Intent::EnterDirectory("docs".into())).await.unwrap();
    explorer.handle(Intent::CreateDirectory("new".into())).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer secret"));
    }
}

#[tokio::test]
async fn upload_posts_form_to_current_location() {
    let (mock, explorer) = setup();
    mock.respond(Method::Post, "/app/files/upload?path=docs/2024", 200, "");
    let start = PathStack::parse("docs/2024").unwrap();

    explorer.handle(Intent::Load(start)).await.unwrap();
    mock.clear_requests();
    explorer
        .handle(Intent::Upload("file=notes.txt".to_string()))
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].body, RecordedBody::Form("file=notes.txt".to_string()));
    assert_eq!(requests[1].url, "/app/files/list?path=docs/2024");
}

#[tokio::test]
async fn names_with_reserved_characters_are_encoded() {
    let (mock, explorer) = setup();
    mock.respond(Method::Get, "/app/files/remove?path=a%20%26%20b%3F.txt", 200, "");

    explorer.refresh().await.unwrap();
    explorer.handle(Intent::Delete("a & b?.txt".into())).await.unwrap();

    assert!(
        mock.urls()
            .contains(&"/app/files/remove?path=a%20%26%20b%3F.txt".to_string())
    );
}
