use httpmock::prelude::*;
use roster_directory::{
    reconcile, ApiConfiguration, DirectoryClient, DirectoryError, ErrorKind, HttpFetcher,
    PageRange,
};
use serde_json::{json, Value};

fn page_body(members: Value, last_page: u32) -> String {
    json!({
        "hydra:member": members,
        "hydra:view": {
            "hydra:first": "/contact-search/contacts?sort=id&page=1",
            "hydra:last": format!("/contact-search/contacts?sort=id&page={last_page}"),
        }
    })
    .to_string()
}

fn client_for(server: &MockServer) -> DirectoryClient<HttpFetcher> {
    let base = ApiConfiguration::new(server.url("/contact-search/contacts"))
        .with_header("x-api-key", "test-key");
    DirectoryClient::new(HttpFetcher::new().expect("create fetcher"), base)
}

#[tokio::test]
async fn test_page_range_resolved_once_over_http() {
    let server = MockServer::start();
    let range_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/contact-search/contacts")
            .query_param("sort", "id")
            .header("x-api-key", "test-key");
        then.status(200)
            .header("content-type", "application/ld+json")
            .body(page_body(json!([{"id": 1001}, {"id": 1012}]), 3));
    });

    let client = client_for(&server);
    let first = client.page_range("id").await.expect("resolve range");
    let second = client.page_range("id").await.expect("cached range");

    assert_eq!(first, PageRange::new(1, 3).expect("range"));
    assert_eq!(first, second);
    range_mock.assert_hits(1);
}

#[tokio::test]
async fn test_binary_search_over_http() {
    let server = MockServer::start();
    let page2 = server.mock(|when, then| {
        when.method(GET)
            .path("/contact-search/contacts")
            .query_param("sort", "id")
            .query_param("page", "2")
            .header("x-api-key", "test-key");
        then.status(200)
            .body(page_body(json!([{"id": 1013}, {"id": 1014}]), 3));
    });
    let page3 = server.mock(|when, then| {
        when.method(GET)
            .path("/contact-search/contacts")
            .query_param("sort", "id")
            .query_param("page", "3");
        then.status(200).body(page_body(
            json!([
                {"id": 1015},
                {"id": 1117, "fullname": "Jim Beam"},
                {"id": 2107}
            ]),
            3,
        ));
    });

    let client = client_for(&server);
    client.cache_page_range("id", PageRange::new(1, 3).expect("range"));
    let located = client.find_person(1117).await.expect("1117 is on page 3");

    assert_eq!(located.page, 3);
    assert_eq!(located.fetches, 2);
    assert_eq!(located.record.get("fullname"), Some(&json!("Jim Beam")));

    page2.assert();
    page3.assert();
}

#[tokio::test]
async fn test_transport_failure_is_not_a_miss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/contact-search/contacts");
        then.status(500).body("upstream exploded");
    });

    let client = client_for(&server);
    let err = client.find_person(1117).await.expect_err("server error");

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_missing_pagination_links() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/contact-search/contacts");
        then.status(200).body(r#"{"hydra:member": []}"#);
    });

    let client = client_for(&server);
    let err = client.page_range("id").await.expect_err("no hydra:view");
    assert!(matches!(err, DirectoryError::MalformedPaginationLinks { .. }));
}

#[tokio::test]
async fn test_organization_members_reconciled_against_page_ids() {
    let server = MockServer::start();
    let members = server.mock(|when, then| {
        when.method(GET)
            .path("/contact-search/contacts")
            .query_param("researchOrganizations.id[]", "62060775");
        then.status(200).body(
            json!({
                "hydra:member": [{"id": 123}, {"id": 456}, {"id": 789}],
                "hydra:totalItems": 3
            })
            .to_string(),
        );
    });

    let client = client_for(&server);
    let org_members = client
        .all_organization_members("62060775")
        .await
        .expect("single page of members");
    let result = reconcile("id", &org_members, &["123", "789"]);

    assert_eq!(result.matching, vec![json!(123), json!(789)]);
    assert_eq!(result.different, vec![json!(456)]);
    members.assert();
}
