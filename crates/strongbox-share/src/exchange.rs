//! Creating and accepting invitations.

use strongbox_core::{BlobId, Ed25519PublicKey, Keypair};
use strongbox_files::{AccessSecret, Chain, Handle};
use strongbox_store::BlobStore;

use crate::crypto::{X25519PublicKey, X25519StaticSecret};
use crate::delegation::DelegationMap;
use crate::error::{Result, ShareError};
use crate::invitation::Invitation;

/// Grant `recipient` access to the file `owner` resolves to.
///
/// Mints a fresh access secret that shares the owner's current handle,
/// gives it an empty delegation map, stores a signed token carrying it at
/// a random location, and records the grant in the owner's map. Returns
/// the token location.
pub fn create_invitation<B: BlobStore + ?Sized>(
    store: &B,
    owner: &AccessSecret,
    recipient: &str,
    recipient_key: &X25519PublicKey,
    signer: &Keypair,
) -> Result<BlobId> {
    let handle = Handle::load(store, owner)?;

    let granted = AccessSecret::generate();
    handle.save(store, &granted)?;
    DelegationMap::new().save(store, &granted)?;

    let token = Invitation::create(&granted, recipient_key, signer)?;
    let token_id = BlobId::random();
    store.put(&token_id, &token.to_bytes())?;

    let mut delegations = DelegationMap::load(store, owner)?;
    delegations.insert(recipient, granted);
    delegations.save(store, owner)?;

    tracing::debug!(recipient, token = %token_id, "created invitation");
    Ok(token_id)
}

/// Redeem the token at `token_id`.
///
/// The token must be signed by `sender` and decrypt under `recipient`.
/// The recovered secret must still resolve to a live chain, so a grant
/// revoked before acceptance is `NotFound`. The token is deleted once it
/// has been redeemed.
pub fn accept_invitation<B: BlobStore + ?Sized>(
    store: &B,
    token_id: &BlobId,
    sender: &Ed25519PublicKey,
    recipient: &X25519StaticSecret,
) -> Result<AccessSecret> {
    let blob = store
        .get(token_id)?
        .ok_or_else(|| ShareError::NotFound(format!("invitation {}", token_id)))?;

    let secret = Invitation::from_bytes(&blob)
        .and_then(|invitation| invitation.open(sender, recipient))
        .map_err(|e| {
            tracing::warn!(token = %token_id, "rejected invitation token");
            e
        })?;

    let handle = Handle::load(store, &secret)?;
    Chain::new(store, &handle).read_tail()?;
    store.delete(token_id)?;

    tracing::debug!(token = %token_id, "accepted invitation");
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revocation::{revoke, RevokedGrants};
    use strongbox_store::MemoryBlobStore;

    fn owned_file(store: &MemoryBlobStore, content: &[u8]) -> AccessSecret {
        let owner = AccessSecret::generate();
        let handle = Handle::generate();
        handle.save(store, &owner).unwrap();
        Chain::new(store, &handle).reset(content).unwrap();
        DelegationMap::new().save(store, &owner).unwrap();
        owner
    }

    #[test]
    fn test_invite_accept_shares_content() {
        let store = MemoryBlobStore::new();
        let owner = owned_file(&store, b"shared");
        let alice = Keypair::generate();
        let bob = X25519StaticSecret::generate();

        let token = create_invitation(&store, &owner, "bob", &bob.public_key(), &alice).unwrap();
        let granted = accept_invitation(&store, &token, &alice.public_key(), &bob).unwrap();

        let handle = Handle::load(&store, &granted).unwrap();
        assert_eq!(Chain::new(&store, &handle).load().unwrap(), b"shared");
        assert_ne!(granted.handle_location(), owner.handle_location());

        let map = DelegationMap::load(&store, &owner).unwrap();
        assert_eq!(
            map.get("bob").unwrap().secret.handle_location(),
            granted.handle_location()
        );
    }

    #[test]
    fn test_token_single_use() {
        let store = MemoryBlobStore::new();
        let owner = owned_file(&store, b"x");
        let alice = Keypair::generate();
        let bob = X25519StaticSecret::generate();

        let token = create_invitation(&store, &owner, "bob", &bob.public_key(), &alice).unwrap();
        accept_invitation(&store, &token, &alice.public_key(), &bob).unwrap();

        assert!(!store.contains(&token).unwrap());
        assert!(matches!(
            accept_invitation(&store, &token, &alice.public_key(), &bob),
            Err(ShareError::NotFound(_))
        ));
    }

    #[test]
    fn test_wrong_sender_does_not_consume_token() {
        let store = MemoryBlobStore::new();
        let owner = owned_file(&store, b"x");
        let alice = Keypair::generate();
        let mallory = Keypair::generate();
        let bob = X25519StaticSecret::generate();

        let token = create_invitation(&store, &owner, "bob", &bob.public_key(), &alice).unwrap();
        let err = accept_invitation(&store, &token, &mallory.public_key(), &bob).unwrap_err();

        assert!(matches!(err, ShareError::Authentication(_)));
        assert!(store.contains(&token).unwrap());
    }

    #[test]
    fn test_revoked_before_accept_not_found() {
        let store = MemoryBlobStore::new();
        let owner = owned_file(&store, b"x");
        let alice = Keypair::generate();
        let bob = X25519StaticSecret::generate();

        let token = create_invitation(&store, &owner, "bob", &bob.public_key(), &alice).unwrap();
        revoke(&store, &owner, "bob", RevokedGrants::Retain).unwrap();

        assert!(matches!(
            accept_invitation(&store, &token, &alice.public_key(), &bob),
            Err(ShareError::NotFound(_))
        ));
    }

    #[test]
    fn test_invite_without_handle_not_found() {
        let store = MemoryBlobStore::new();
        let err = create_invitation(
            &store,
            &AccessSecret::generate(),
            "bob",
            &X25519StaticSecret::generate().public_key(),
            &Keypair::generate(),
        )
        .unwrap_err();
        assert!(matches!(err, ShareError::NotFound(_)));
    }
}
