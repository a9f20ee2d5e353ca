//! Shared test double: an in-memory rendition of the administration server.
//!
//! Faithful to the REST contract the client expects: `POST` assigns
//! identifiers, `PUT` upserts by payload identifier, listings honour
//! `page`/`size`, and operations on missing identifiers answer 404 with a
//! problem payload.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use campus_client::domain::ports::{Method, Transport, TransportError, WireRequest, WireResponse};
use serde_json::{Value, json};

#[derive(Default)]
pub struct InMemoryServer {
    state: Mutex<ServerState>,
}

#[derive(Default)]
struct ServerState {
    collections: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
}

fn json_response(status: u16, body: &Value) -> WireResponse {
    WireResponse {
        status,
        headers: vec![("content-type".to_owned(), "application/json".to_owned())],
        body: serde_json::to_vec(body).expect("test body should serialise"),
    }
}

fn not_found() -> WireResponse {
    json_response(404, &json!({ "title": "Not Found", "status": 404 }))
}

fn bad_request(detail: &str) -> WireResponse {
    json_response(400, &json!({ "title": "Bad Request", "detail": detail }))
}

fn query_value(request: &WireRequest, key: &str) -> Option<usize> {
    request
        .query
        .iter()
        .find(|(name, _)| name == key)
        .and_then(|(_, value)| value.parse().ok())
}

impl InMemoryServer {
    fn create(&self, collection: &str, body: Value) -> WireResponse {
        let mut state = self.state.lock().unwrap();
        if body.get("id").is_some_and(|id| !id.is_null()) {
            return bad_request("a new entity cannot already have an id");
        }
        state.next_id += 1;
        let id = state.next_id;
        let mut stored = body;
        stored["id"] = json!(id);
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id, stored.clone());
        json_response(201, &stored)
    }

    fn update(&self, collection: &str, body: Value) -> WireResponse {
        let Some(id) = body.get("id").and_then(Value::as_i64) else {
            return bad_request("an update must carry an id");
        };
        let mut state = self.state.lock().unwrap();
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id, body.clone());
        json_response(200, &body)
    }

    fn list(&self, collection: &str, request: &WireRequest) -> WireResponse {
        let state = self.state.lock().unwrap();
        let records: Vec<Value> = state
            .collections
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default();

        let total = records.len();
        let listing: Vec<Value> = match query_value(request, "size") {
            Some(size) => {
                let page = query_value(request, "page").unwrap_or(0);
                records.into_iter().skip(page * size).take(size).collect()
            }
            None => records,
        };
        let mut response = json_response(200, &Value::Array(listing));
        response
            .headers
            .push(("X-Total-Count".to_owned(), total.to_string()));
        response
    }

    fn fetch(&self, collection: &str, id: i64) -> WireResponse {
        let state = self.state.lock().unwrap();
        state
            .collections
            .get(collection)
            .and_then(|records| records.get(&id))
            .map_or_else(not_found, |record| json_response(200, record))
    }

    fn remove(&self, collection: &str, id: i64) -> WireResponse {
        let mut state = self.state.lock().unwrap();
        let removed = state
            .collections
            .get_mut(collection)
            .and_then(|records| records.remove(&id));
        match removed {
            Some(_) => json_response(200, &Value::Null),
            None => not_found(),
        }
    }
}

#[async_trait]
impl Transport for InMemoryServer {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let (collection, id) = match request.path.split_once('/') {
            Some((collection, raw_id)) => {
                let id = raw_id
                    .parse::<i64>()
                    .map_err(|_| TransportError::request(format!("bad path: {}", request.path)))?;
                (collection, Some(id))
            }
            None => (request.path.as_str(), None),
        };

        let response = match (request.method, id) {
            (Method::Post, None) => {
                self.create(collection, request.body.clone().unwrap_or(Value::Null))
            }
            (Method::Put, None) => {
                self.update(collection, request.body.clone().unwrap_or(Value::Null))
            }
            (Method::Get, None) => self.list(collection, &request),
            (Method::Get, Some(id)) => self.fetch(collection, id),
            (Method::Delete, Some(id)) => self.remove(collection, id),
            _ => bad_request("unsupported route"),
        };
        Ok(response)
    }
}
