//! Generic entity service: CRUD over one REST collection.
//!
//! One instance per entity type replaces the N near-identical generated
//! services of the original application. Every operation is a single round
//! trip: the outbound payload passes through [`Entity::to_server`] exactly
//! once, every inbound body passes through [`Entity::from_server`] exactly
//! once (element-wise for listings), and failures surface to the immediate
//! caller unmodified — no retry, no caching.

use std::marker::PhantomData;
use std::sync::Arc;

use request_options::RequestOptions;
use serde::Serialize;

use super::entity::{Entity, EntityId, EntityResponse, ResponseContext};
use super::error::{ClientResult, Error};
use super::ports::{Transport, WireRequest, WireResponse};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Data access for one entity type over its REST collection.
pub struct EntityService<T: Entity> {
    transport: Arc<dyn Transport>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> EntityService<T> {
    /// Build a service issuing requests through the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _entity: PhantomData,
        }
    }

    /// Create a new entity.
    ///
    /// The draft is expected to carry no identifier (not enforced here; the
    /// server rejects drafts that already have one). On success the returned
    /// body is the persisted entity, identifier included.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server rejections (validation,
    /// conflict) unmodified.
    pub async fn create(&self, entity: &T) -> ClientResult<EntityResponse<T>> {
        tracing::debug!(collection = T::COLLECTION, "requesting entity creation");
        let payload = encode(&entity.to_server())?;
        let response = self
            .transport
            .execute(WireRequest::post(T::COLLECTION.to_owned(), payload))
            .await?;
        decode_entity(response)
    }

    /// Update an existing entity.
    ///
    /// The entity must carry a defined identifier; the server resolves the
    /// record from the payload, so the request targets the collection root.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server rejections unmodified.
    pub async fn update(&self, entity: &T) -> ClientResult<EntityResponse<T>> {
        tracing::debug!(
            collection = T::COLLECTION,
            id = entity.id(),
            "requesting entity update"
        );
        let payload = encode(&entity.to_server())?;
        let response = self
            .transport
            .execute(WireRequest::put(T::COLLECTION.to_owned(), payload))
            .await?;
        decode_entity(response)
    }

    /// Fetch one entity by identifier.
    ///
    /// # Errors
    ///
    /// Fails with a [`crate::domain::ErrorCode::NotFound`] error when the
    /// identifier does not exist server-side.
    pub async fn find(&self, id: EntityId) -> ClientResult<EntityResponse<T>> {
        tracing::debug!(collection = T::COLLECTION, id, "requesting entity");
        let response = self
            .transport
            .execute(WireRequest::get(format!("{}/{id}", T::COLLECTION)))
            .await?;
        decode_entity(response)
    }

    /// List entities in server-determined order.
    ///
    /// Recognised option keys (page, size, sort) become query parameters;
    /// absent options yield an unfiltered listing.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server rejections unmodified.
    pub async fn query(
        &self,
        options: Option<&RequestOptions>,
    ) -> ClientResult<EntityResponse<Vec<T>>> {
        tracing::debug!(collection = T::COLLECTION, "requesting entity listing");
        let mut request = WireRequest::get(T::COLLECTION.to_owned());
        if let Some(options) = options {
            request = request.with_query(options.to_query_pairs());
        }
        let response = self.transport.execute(request).await?;
        decode_listing(response)
    }

    /// Remove one entity by identifier.
    ///
    /// Not idempotent: deleting an identifier that does not exist fails with
    /// a [`crate::domain::ErrorCode::NotFound`] error.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server rejections unmodified.
    pub async fn delete(&self, id: EntityId) -> ClientResult<EntityResponse<()>> {
        tracing::debug!(collection = T::COLLECTION, id, "requesting entity removal");
        let response = self
            .transport
            .execute(WireRequest::delete(format!("{}/{id}", T::COLLECTION)))
            .await?;
        let (context, body) = split(response);
        ensure_success(&context, &body)?;
        Ok(EntityResponse { context, body: () })
    }
}

fn encode(payload: &impl Serialize) -> ClientResult<serde_json::Value> {
    serde_json::to_value(payload)
        .map_err(|error| Error::internal(format!("failed to serialise request payload: {error}")))
}

fn split(response: WireResponse) -> (ResponseContext, Vec<u8>) {
    let WireResponse {
        status,
        headers,
        body,
    } = response;
    (ResponseContext { status, headers }, body)
}

fn decode_entity<T: Entity>(response: WireResponse) -> ClientResult<EntityResponse<T>> {
    let (context, body) = split(response);
    ensure_success(&context, &body)?;
    let wire: T = serde_json::from_slice(&body)
        .map_err(|error| Error::decode(format!("invalid entity payload: {error}")))?;
    Ok(EntityResponse {
        context,
        body: T::from_server(wire),
    })
}

fn decode_listing<T: Entity>(response: WireResponse) -> ClientResult<EntityResponse<Vec<T>>> {
    let (context, body) = split(response);
    ensure_success(&context, &body)?;
    let wire: Vec<T> = serde_json::from_slice(&body)
        .map_err(|error| Error::decode(format!("invalid listing payload: {error}")))?;
    Ok(EntityResponse {
        context,
        body: wire.into_iter().map(T::from_server).collect(),
    })
}

fn ensure_success(context: &ResponseContext, body: &[u8]) -> ClientResult<()> {
    if (200..300).contains(&context.status) {
        return Ok(());
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", context.status)
    } else {
        format!("status {}: {preview}", context.status)
    };

    let error = match context.status {
        404 => Error::not_found(message),
        409 => Error::conflict(message),
        400..=499 => Error::invalid_request(message),
        _ => Error::transport(message),
    };

    // Keep the server's structured problem payload when there is one.
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(details) => Err(error.with_details(details)),
        Err(_) => Err(error),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
