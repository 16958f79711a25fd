//! Opening sealed file structures.

use serde::de::DeserializeOwned;
use strongbox_core::{open_value, BlobId, SecretKey};

use crate::error::{FilesError, Result};

/// Open the blob read from `id`, logging a failed integrity check.
pub(crate) fn open_at<T: DeserializeOwned>(
    key: &SecretKey,
    id: &BlobId,
    blob: &[u8],
    structure: &'static str,
) -> Result<T> {
    open_value(key, blob).map_err(|e| {
        let err = FilesError::from(e);
        if matches!(err, FilesError::Integrity) {
            tracing::warn!(%id, structure, "sealed blob failed integrity check");
        }
        err
    })
}
