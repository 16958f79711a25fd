//! Revocation by re-keying.
//!
//! Revoking a grant rewrites the file under a fresh tail slot and chunk key,
//! deletes the old chain, then walks the delegation tree from the revoker
//! and points every still-active handle at the new location. The revoked
//! grant and everything below it keep handles that name a tail slot that
//! no longer exists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use strongbox_core::BlobId;
use strongbox_files::{AccessSecret, Chain, Handle};
use strongbox_store::BlobStore;

use crate::delegation::DelegationMap;
use crate::error::{Result, ShareError};

/// What happens to a delegation map entry once it is revoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokedGrants {
    /// Keep the entry, flagged revoked. Revoking it again re-keys the file
    /// and succeeds.
    #[default]
    Retain,
    /// Remove the entry. Revoking it again is a policy error.
    Prune,
}

/// Summary of a completed revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationReport {
    /// Handles rewritten, including the revoker's own.
    pub handles_rekeyed: usize,
    /// Chunks removed from the old chain.
    pub chunks_deleted: usize,
}

/// Revoke the grant `owner` made to `target`.
pub fn revoke<B: BlobStore + ?Sized>(
    store: &B,
    owner: &AccessSecret,
    target: &str,
    policy: RevokedGrants,
) -> Result<RevocationReport> {
    let handle = Handle::load(store, owner)?;
    let mut delegations = DelegationMap::load(store, owner)?;
    if delegations.get(target).is_none() {
        return Err(ShareError::Policy(format!(
            "{} holds no grant from this secret",
            target
        )));
    }

    let old_chain = Chain::new(store, &handle);
    let contents = old_chain.collect()?;
    old_chain.destroy(&contents.chunk_ids)?;

    let rekeyed = Handle::generate();
    Chain::new(store, &rekeyed).reset(&contents.content)?;
    rekeyed.save(store, owner)?;

    match policy {
        RevokedGrants::Retain => {
            delegations.mark_revoked(target);
        }
        RevokedGrants::Prune => {
            delegations.remove(target);
        }
    }
    delegations.save(store, owner)?;

    let handles_rekeyed = 1 + cascade(store, owner, &delegations, &rekeyed)?;

    tracing::debug!(
        target,
        handles_rekeyed,
        chunks_deleted = contents.chunk_ids.len(),
        "revoked grant"
    );

    Ok(RevocationReport {
        handles_rekeyed,
        chunks_deleted: contents.chunk_ids.len(),
    })
}

/// Point every active grant reachable from `root` at `handle`.
///
/// `root_map` is the revoker's already-updated delegation map. Returns the
/// number of handles written, not counting the root's.
fn cascade<B: BlobStore + ?Sized>(
    store: &B,
    root: &AccessSecret,
    root_map: &DelegationMap,
    handle: &Handle,
) -> Result<usize> {
    let mut visited: HashSet<BlobId> = HashSet::new();
    visited.insert(root.handle_location());

    let mut pending: Vec<AccessSecret> = root_map
        .active()
        .map(|(_, secret)| secret.clone())
        .collect();
    let mut written = 0;

    while let Some(secret) = pending.pop() {
        if !visited.insert(secret.handle_location()) {
            continue;
        }

        handle.save(store, &secret)?;
        written += 1;

        let delegations = DelegationMap::load(store, &secret)?;
        pending.extend(delegations.active().map(|(_, child)| child.clone()));
    }

    tracing::debug!(written, "cascaded new handle");
    Ok(written)
}
