//! Backend abstraction for geometry upload
//!
//! The scene never talks to a graphics API directly. It hands vertex and index
//! data to a [`GeometryBackend`] and keeps the returned [`GeometryHandle`]
//! until teardown.

use std::collections::HashMap;
use thiserror::Error;

use crate::render::Vertex;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors reported by a rendering backend
#[derive(Error, Debug)]
pub enum RenderError {
    /// Backend rejected or failed to create a geometry buffer
    #[error("Geometry upload failed for '{label}': {reason}")]
    UploadFailed {
        /// Label passed with the upload
        label: String,
        /// Backend-specific reason
        reason: String,
    },

    /// Handle does not belong to this backend or was already released
    #[error("Unknown geometry handle: {0:?}")]
    UnknownHandle(GeometryHandle),
}

/// Opaque handle to backend-owned geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u64);

/// Sink for uploaded geometry
pub trait GeometryBackend {
    /// Upload vertex and index data, returning a handle that owns it
    fn upload_geometry(&mut self, label: &str, vertices: &[Vertex], indices: &[u32]) -> BackendResult<GeometryHandle>;

    /// Free the geometry behind `handle`
    fn release_geometry(&mut self, handle: GeometryHandle) -> BackendResult<()>;
}

/// Summary of one live upload held by [`HeadlessBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Label passed with the upload
    pub label: String,
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of indices
    pub index_count: usize,
    /// Bytes that a real backend would have copied
    pub byte_size: usize,
}

/// Backend that only keeps bookkeeping, for tools and tests without a GPU
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: HashMap<GeometryHandle, UploadRecord>,
    released: usize,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of successful releases so far
    pub fn released_count(&self) -> usize {
        self.released
    }

    /// Details of a live upload
    pub fn record(&self, handle: GeometryHandle) -> Option<&UploadRecord> {
        self.live.get(&handle)
    }

    /// Total bytes currently held
    pub fn live_bytes(&self) -> usize {
        self.live.values().map(|r| r.byte_size).sum()
    }
}

impl GeometryBackend for HeadlessBackend {
    fn upload_geometry(&mut self, label: &str, vertices: &[Vertex], indices: &[u32]) -> BackendResult<GeometryHandle> {
        if vertices.is_empty() {
            return Err(RenderError::UploadFailed {
                label: label.to_string(),
                reason: "no vertices".to_string(),
            });
        }

        let handle = GeometryHandle(self.next_handle);
        self.next_handle += 1;

        let byte_size = std::mem::size_of_val(vertices) + std::mem::size_of_val(indices);
        self.live.insert(
            handle,
            UploadRecord {
                label: label.to_string(),
                vertex_count: vertices.len(),
                index_count: indices.len(),
                byte_size,
            },
        );
        log::trace!("Uploaded '{}' as {:?} ({} bytes)", label, handle, byte_size);
        Ok(handle)
    }

    fn release_geometry(&mut self, handle: GeometryHandle) -> BackendResult<()> {
        self.live.remove(&handle).ok_or(RenderError::UnknownHandle(handle))?;
        self.released += 1;
        Ok(())
    }
}
