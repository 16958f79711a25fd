//! Append-only chunk chains.
//!
//! A file version is a backward linked list of sealed chunks. The tail slot
//! named by the [`Handle`] holds the id of the newest chunk; each chunk
//! holds the id of its predecessor, and the oldest chunk points at
//! [`BlobId::NIL`].

use serde::{Deserialize, Serialize};

use strongbox_core::{seal_value, BlobId};
use strongbox_store::BlobStore;

use crate::error::{FilesError, Result};
use crate::handle::Handle;
use crate::sealed::open_at;

/// One immutable unit of content plus a back-pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The bytes this chunk contributes.
    #[serde(with = "serde_bytes")]
    pub content: Vec<u8>,
    /// Id of the previous chunk, or `BlobId::NIL` for the oldest.
    pub prev: BlobId,
}

/// Everything reachable from a tail slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainContents {
    /// Concatenated content, oldest chunk first.
    pub content: Vec<u8>,
    /// Ids of every chunk visited, newest first.
    pub chunk_ids: Vec<BlobId>,
}

/// Read and write operations over the chain a handle points at.
pub struct Chain<'a, B: BlobStore + ?Sized> {
    store: &'a B,
    handle: &'a Handle,
}

impl<'a, B: BlobStore + ?Sized> Chain<'a, B> {
    /// Operate on the chain behind `handle`.
    pub fn new(store: &'a B, handle: &'a Handle) -> Self {
        Self { store, handle }
    }

    /// Read the id of the newest chunk from the tail slot.
    pub fn read_tail(&self) -> Result<BlobId> {
        let blob = self
            .store
            .get(&self.handle.tail_slot)?
            .ok_or_else(|| FilesError::NotFound(format!("tail slot {}", self.handle.tail_slot)))?;
        open_at(&self.handle.chunk_key, &self.handle.tail_slot, &blob, "tail slot")
    }

    /// Replace the whole content with a single chunk.
    ///
    /// The previous chain becomes unreachable but is not deleted.
    pub fn reset(&self, content: &[u8]) -> Result<BlobId> {
        self.push(content, BlobId::NIL)
    }

    /// Add `content` after the current newest chunk.
    ///
    /// Writes exactly one chunk and the tail slot; the volume written does
    /// not depend on how long the chain already is.
    pub fn append(&self, content: &[u8]) -> Result<BlobId> {
        let prev = self.read_tail()?;
        self.push(content, prev)
    }

    /// Reconstruct the full content, oldest chunk first.
    pub fn load(&self) -> Result<Vec<u8>> {
        Ok(self.collect()?.content)
    }

    /// Walk the chain from the tail back to the nil sentinel.
    pub fn collect(&self) -> Result<ChainContents> {
        let mut segments = Vec::new();
        let mut chunk_ids = Vec::new();
        let mut cursor = self.read_tail()?;

        while !cursor.is_nil() {
            let chunk = self.read_chunk(&cursor)?;
            chunk_ids.push(cursor);
            cursor = chunk.prev;
            segments.push(chunk.content);
        }

        let total = segments.iter().map(Vec::len).sum();
        let mut content = Vec::with_capacity(total);
        for segment in segments.iter().rev() {
            content.extend_from_slice(segment);
        }

        Ok(ChainContents { content, chunk_ids })
    }

    /// Delete the tail slot and the given chunks from the store.
    pub fn destroy(&self, chunk_ids: &[BlobId]) -> Result<()> {
        self.store.delete(&self.handle.tail_slot)?;
        for id in chunk_ids {
            self.store.delete(id)?;
        }
        tracing::debug!(chunks = chunk_ids.len(), "destroyed chunk chain");
        Ok(())
    }

    fn read_chunk(&self, id: &BlobId) -> Result<Chunk> {
        let blob = self
            .store
            .get(id)?
            .ok_or_else(|| FilesError::NotFound(format!("chunk {}", id)))?;
        open_at(&self.handle.chunk_key, id, &blob, "chunk")
    }

    fn push(&self, content: &[u8], prev: BlobId) -> Result<BlobId> {
        let id = BlobId::random();
        let chunk = Chunk {
            content: content.to_vec(),
            prev,
        };

        self.store
            .put(&id, &seal_value(&self.handle.chunk_key, &chunk)?)?;
        self.store
            .put(&self.handle.tail_slot, &seal_value(&self.handle.chunk_key, &id)?)?;
        Ok(id)
    }
}
