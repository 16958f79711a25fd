//! Local name bindings: filename to access secret, per user.

use strongbox_core::{seal_value, BlobId, SecretKey};
use strongbox_store::BlobStore;

use crate::error::{FilesError, Result};
use crate::sealed::open_at;
use crate::secret::AccessSecret;

/// A user's private namespace of filenames.
///
/// Each binding lives at `DeriveId(root_key, filename)`, sealed under the
/// root key. Once written, a binding always names the same secret.
pub struct NameBindings<'a, B: BlobStore + ?Sized> {
    store: &'a B,
    root_key: &'a SecretKey,
}

impl<'a, B: BlobStore + ?Sized> NameBindings<'a, B> {
    pub fn new(store: &'a B, root_key: &'a SecretKey) -> Self {
        Self { store, root_key }
    }

    /// Storage location for a filename's binding.
    pub fn location(&self, filename: &str) -> BlobId {
        self.root_key.derive_id(filename)
    }

    /// The secret bound to `filename`, if any.
    pub fn lookup(&self, filename: &str) -> Result<Option<AccessSecret>> {
        let location = self.location(filename);
        match self.store.get(&location)? {
            Some(blob) => Ok(Some(open_at(self.root_key, &location, &blob, "binding")?)),
            None => Ok(None),
        }
    }

    /// Like [`lookup`](Self::lookup) but an unbound name is `NotFound`.
    pub fn resolve(&self, filename: &str) -> Result<AccessSecret> {
        self.lookup(filename)?
            .ok_or_else(|| FilesError::NotFound(format!("no file named {:?}", filename)))
    }

    /// Bind `filename` to `secret`.
    pub fn bind(&self, filename: &str, secret: &AccessSecret) -> Result<()> {
        let blob = seal_value(self.root_key, secret)?;
        self.store.put(&self.location(filename), &blob)?;
        Ok(())
    }

    /// Whether a binding exists, without opening it.
    pub fn exists(&self, filename: &str) -> Result<bool> {
        Ok(self.store.contains(&self.location(filename))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strongbox_store::MemoryBlobStore;

    #[test]
    fn test_bind_and_resolve() {
        let store = MemoryBlobStore::new();
        let root = SecretKey::generate();
        let names = NameBindings::new(&store, &root);
        let secret = AccessSecret::generate();

        assert!(!names.exists("notes.txt").unwrap());
        names.bind("notes.txt", &secret).unwrap();
        assert!(names.exists("notes.txt").unwrap());

        let resolved = names.resolve("notes.txt").unwrap();
        assert_eq!(resolved.handle_location(), secret.handle_location());
    }

    #[test]
    fn test_unbound_name() {
        let store = MemoryBlobStore::new();
        let root = SecretKey::generate();
        let names = NameBindings::new(&store, &root);

        assert!(names.lookup("missing").unwrap().is_none());
        assert!(matches!(
            names.resolve("missing"),
            Err(FilesError::NotFound(_))
        ));
    }

    #[test]
    fn test_namespaces_are_per_root_key() {
        let store = MemoryBlobStore::new();
        let alice = SecretKey::generate();
        let bob = SecretKey::generate();

        NameBindings::new(&store, &alice)
            .bind("shared-name", &AccessSecret::generate())
            .unwrap();

        let bob_names = NameBindings::new(&store, &bob);
        assert!(!bob_names.exists("shared-name").unwrap());
        assert_ne!(
            NameBindings::new(&store, &alice).location("shared-name"),
            bob_names.location("shared-name")
        );
    }

    #[test]
    fn test_tampered_binding_fails_integrity() {
        let store = MemoryBlobStore::new();
        let root = SecretKey::generate();
        let names = NameBindings::new(&store, &root);
        names.bind("f", &AccessSecret::generate()).unwrap();

        let location = names.location("f");
        let mut blob = store.get(&location).unwrap().unwrap().to_vec();
        blob[0] ^= 1;
        store.put(&location, &blob).unwrap();

        assert!(matches!(names.resolve("f"), Err(FilesError::Integrity)));
    }
}
