// ABOUTME: Document store abstraction with merge writes and live snapshot subscriptions
// ABOUTME: Pluggable backend support following the remote collaborator's path and merge semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Store
//!
//! The client never owns its data: everything lives in a per-user slice of
//! an external document store, organized as collections of JSON documents.
//! This module defines that collaborator as a trait so services can be
//! tested against the in-memory backend, plus the path scheme and the live
//! subscription types.
//!
//! Subscriptions follow a push model. Watching a path yields the current
//! state immediately and then the authoritative latest snapshot after every
//! change; consumers replace their view state with each push rather than
//! merging. Dropping the watch (or calling [`DocumentWatch::cancel`]) ends
//! delivery.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pierre_fitness_client::store::{DocumentStore, InMemoryStore, UserScope};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), pierre_fitness_client::errors::AppError> {
//! let store = InMemoryStore::new();
//! let scope = UserScope::new("pierre-fitness", "user-1");
//!
//! // Merge write: only the listed fields change
//! store
//!     .set_merge(&scope.profile(), json!({ "height": 175, "age": 30 }))
//!     .await?;
//!
//! let profile = store.get(&scope.profile()).await?;
//! assert!(profile.is_some());
//! # Ok(())
//! # }
//! ```

/// In-memory store implementation
pub mod memory;

pub use memory::InMemoryStore;

use std::fmt;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::Stream;

use crate::errors::{AppError, AppResult};

// ============================================================================
// Paths
// ============================================================================

/// Slash-separated path of a single document
///
/// Always an even number of segments: alternating collection and document
/// ids, e.g. `apps/pierre-fitness/users/u1/profile/data`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Wrap a raw path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The full path as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent collection and document id
    #[must_use]
    pub fn split(&self) -> (CollectionPath, &str) {
        self.0.rsplit_once('/').map_or_else(
            || (CollectionPath(String::new()), self.0.as_str()),
            |(collection, id)| (CollectionPath(collection.to_owned()), id),
        )
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slash-separated path of a collection of documents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Wrap a raw path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The full path as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a document inside this collection
    #[must_use]
    pub fn document(&self, id: &str) -> DocumentPath {
        DocumentPath(format!("{}/{id}", self.0))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path builder for one user's slice of the store
///
/// All user data hangs off `apps/{app_id}/users/{user_id}`: daily logs
/// keyed by ISO calendar date, food logs keyed by generated id, and the
/// profile and workout plan singletons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScope {
    app_id: String,
    user_id: String,
}

impl UserScope {
    /// Scope paths to one user of one application
    #[must_use]
    pub fn new(app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
        }
    }

    fn root(&self) -> String {
        format!("apps/{}/users/{}", self.app_id, self.user_id)
    }

    /// Collection of daily logs, one document per calendar day
    #[must_use]
    pub fn daily_logs(&self) -> CollectionPath {
        CollectionPath(format!("{}/dailyLogs", self.root()))
    }

    /// Daily log document for a calendar day
    #[must_use]
    pub fn daily_log(&self, date: NaiveDate) -> DocumentPath {
        DocumentPath(format!("{}/dailyLogs/{date}", self.root()))
    }

    /// Collection of logged meals
    #[must_use]
    pub fn food_logs(&self) -> CollectionPath {
        CollectionPath(format!("{}/foodLogs", self.root()))
    }

    /// One logged meal by generated id
    #[must_use]
    pub fn food_log(&self, id: &str) -> DocumentPath {
        DocumentPath(format!("{}/foodLogs/{id}", self.root()))
    }

    /// Profile singleton document
    #[must_use]
    pub fn profile(&self) -> DocumentPath {
        DocumentPath(format!("{}/profile/data", self.root()))
    }

    /// Current workout plan singleton document
    #[must_use]
    pub fn workout_plan(&self) -> DocumentPath {
        DocumentPath(format!("{}/plans/current", self.root()))
    }
}

// ============================================================================
// Documents and Snapshots
// ============================================================================

/// A stored document: its id within the collection plus its JSON fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id, the last path segment
    pub id: String,
    /// Field map as a JSON object
    pub fields: Value,
}

impl Document {
    /// Deserialize the field map into a typed record
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::SerializationError` when the stored fields do
    /// not match the target shape.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(self.fields.clone()).map_err(AppError::from)
    }
}

/// Authoritative latest state of one watched document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    /// The document, or `None` while it does not exist
    pub document: Option<Document>,
}

impl DocumentSnapshot {
    /// Whether the document existed at this point
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.document.is_some()
    }
}

/// Authoritative latest state of one watched collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    /// Every document currently in the collection, ordered by id
    pub documents: Vec<Document>,
}

// ============================================================================
// Watches
// ============================================================================

/// Live subscription to one document
///
/// Yields the current snapshot immediately, then the latest snapshot after
/// each change. Intermediate states may be coalesced; the newest one always
/// arrives.
pub struct DocumentWatch {
    stream: WatchStream<DocumentSnapshot>,
}

impl DocumentWatch {
    /// Wrap a state channel receiver
    #[must_use]
    pub fn new(receiver: watch::Receiver<DocumentSnapshot>) -> Self {
        Self {
            stream: WatchStream::new(receiver),
        }
    }

    /// Stop receiving snapshots
    pub fn cancel(self) {
        drop(self);
    }
}

impl Stream for DocumentWatch {
    type Item = DocumentSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl fmt::Debug for DocumentWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentWatch").finish_non_exhaustive()
    }
}

/// Live subscription to a whole collection
pub struct CollectionWatch {
    stream: WatchStream<CollectionSnapshot>,
}

impl CollectionWatch {
    /// Wrap a state channel receiver
    #[must_use]
    pub fn new(receiver: watch::Receiver<CollectionSnapshot>) -> Self {
        Self {
            stream: WatchStream::new(receiver),
        }
    }

    /// Stop receiving snapshots
    pub fn cancel(self) {
        drop(self);
    }
}

impl Stream for CollectionWatch {
    type Item = CollectionSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl fmt::Debug for CollectionWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionWatch").finish_non_exhaustive()
    }
}

// ============================================================================
// Store Trait
// ============================================================================

/// Document store collaborator
///
/// Object safe so services can take `&dyn DocumentStore`; typed access goes
/// through [`Document::decode`] and `serde_json::to_value` at call sites.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails. A missing document is
    /// `Ok(None)`, not an error.
    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>>;

    /// Replace a document wholesale
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` when `fields` is not a JSON
    /// object, or a backend error if the write fails.
    async fn set(&self, path: &DocumentPath, fields: Value) -> AppResult<()>;

    /// Merge fields into a document, creating it if absent
    ///
    /// Top-level fields of `fields` overwrite or extend the stored object;
    /// fields not listed keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` when `fields` is not a JSON
    /// object, or a backend error if the write fails.
    async fn set_merge(&self, path: &DocumentPath, fields: Value) -> AppResult<()>;

    /// Append a document with a generated id, returning the id
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` when `fields` is not a JSON
    /// object, or a backend error if the write fails.
    async fn add(&self, collection: &CollectionPath, fields: Value) -> AppResult<String>;

    /// Delete a document; deleting a missing document is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the backend delete fails.
    async fn delete(&self, path: &DocumentPath) -> AppResult<()>;

    /// Read every document in a collection, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    async fn list(&self, collection: &CollectionPath) -> AppResult<Vec<Document>>;

    /// Subscribe to one document's state
    async fn watch_document(&self, path: &DocumentPath) -> DocumentWatch;

    /// Subscribe to a whole collection's state
    async fn watch_collection(&self, collection: &CollectionPath) -> CollectionWatch;
}
