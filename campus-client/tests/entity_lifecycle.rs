//! Contract tests for the generic entity service against the in-memory
//! server double.
//!
//! These pin the end-to-end CRUD contract: identifier assignment on
//! create, read-your-writes through update, listing/find consistency,
//! and 404 semantics for missing identifiers (deletion included).

mod support;

use std::sync::Arc;

use campus_client::CampusClient;
use campus_client::domain::{Building, ErrorCode, Notification, NotificationType};
use request_options::{RequestOptions, SortSpec};

use support::InMemoryServer;

fn client() -> CampusClient {
    CampusClient::with_transport(Arc::new(InMemoryServer::default()))
}

fn named(name: &str) -> Building {
    Building {
        name: Some(name.to_owned()),
        ..Building::default()
    }
}

#[tokio::test]
async fn create_assigns_a_defined_identifier() {
    let buildings = client().buildings();

    let created = buildings
        .create(&named("Hall A"))
        .await
        .expect("create should succeed");

    assert!(created.body.id.is_some(), "server assigns the identifier");
    assert_eq!(created.body.name.as_deref(), Some("Hall A"));
    assert_eq!(created.context.status, 201);
}

#[tokio::test]
async fn find_after_update_returns_the_updated_fields() {
    let buildings = client().buildings();

    let mut building = buildings
        .create(&named("Hall A"))
        .await
        .expect("create should succeed")
        .body;
    let id = building.id.expect("created entity has an id");

    building.description = Some("renovated".to_owned());
    buildings
        .update(&building)
        .await
        .expect("update should succeed");

    let fetched = buildings.find(id).await.expect("find should succeed").body;
    assert_eq!(fetched.description.as_deref(), Some("renovated"));
    assert_eq!(fetched.name.as_deref(), Some("Hall A"));
}

#[tokio::test]
async fn unfiltered_query_is_consistent_with_per_id_find() {
    let buildings = client().buildings();
    for name in ["Hall A", "Hall B", "Hall C"] {
        buildings
            .create(&named(name))
            .await
            .expect("create should succeed");
    }

    let listing = buildings
        .query(None)
        .await
        .expect("query should succeed")
        .body;
    assert_eq!(listing.len(), 3);

    for element in listing {
        let id = element.id.expect("listed entity has an id");
        let fetched = buildings.find(id).await.expect("find should succeed").body;
        assert_eq!(fetched, element, "listing and per-id fetch agree");
    }
}

#[tokio::test]
async fn paged_query_narrows_the_listing() {
    let buildings = client().buildings();
    for name in ["Hall A", "Hall B", "Hall C"] {
        buildings
            .create(&named(name))
            .await
            .expect("create should succeed");
    }

    let sort = SortSpec::ascending("name").expect("sort field is non-empty");
    let options = RequestOptions::new().with_page(1).with_size(2).sorted_by(sort);
    let page = buildings
        .query(Some(&options))
        .await
        .expect("query should succeed");

    assert_eq!(page.body.len(), 1, "second page holds the remainder");
    assert_eq!(page.body[0].name.as_deref(), Some("Hall C"));
    assert_eq!(
        page.context.header("x-total-count"),
        Some("3"),
        "the unpaged collection size travels in the header",
    );
}

#[tokio::test]
async fn delete_then_find_fails_not_found() {
    let buildings = client().buildings();
    let id = buildings
        .create(&named("Hall A"))
        .await
        .expect("create should succeed")
        .body
        .id
        .expect("created entity has an id");

    buildings.delete(id).await.expect("delete should succeed");

    let error = buildings
        .find(id)
        .await
        .expect_err("deleted entity is gone");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(
        error.details().is_some(),
        "the server problem payload travels with the error",
    );
}

#[tokio::test]
async fn deleting_a_missing_identifier_fails_not_found() {
    let buildings = client().buildings();

    let error = buildings
        .delete(9999)
        .await
        .expect_err("nothing to delete");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn notifications_round_trip_with_tagged_type_and_timestamp() {
    let notifications = client().notifications();

    let draft = Notification {
        kind: Some(NotificationType::Check),
        title: Some("fire drill".to_owned()),
        date: Some("2026-03-01T09:30:00Z".parse().expect("timestamp parses")),
        ..Notification::default()
    };

    let created = notifications
        .create(&draft)
        .await
        .expect("create should succeed")
        .body;
    let id = created.id.expect("created entity has an id");

    let fetched = notifications
        .find(id)
        .await
        .expect("find should succeed")
        .body;
    assert_eq!(fetched.kind, Some(NotificationType::Check));
    assert_eq!(fetched.date, draft.date);
}
