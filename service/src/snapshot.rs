//! Economy snapshots — capture the whole economy state at a point in time.
//!
//! A snapshot carries a Blake2b-256 hash of the serialized state so a
//! restore can verify integrity before trusting the bytes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::path::Path;

use pedal_types::Timestamp;

use crate::economy::EconomyState;
use crate::error::EconomyError;

/// A point-in-time capture of the full economy state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Blake2b-256 of `state_bytes`.
    pub hash: [u8; 32],
    /// When the snapshot was taken.
    pub created_at: Timestamp,
    /// Snapshot version for compatibility.
    pub version: u32,
    /// Bincode-serialized [`EconomyState`].
    state_bytes: Vec<u8>,
}

impl EconomySnapshot {
    const VERSION: u32 = 1;

    pub(crate) fn capture(state: &EconomyState, created_at: Timestamp) -> Self {
        let state_bytes =
            bincode::serialize(state).expect("economy state is always serializable");
        let hash = hash_bytes(&state_bytes);
        Self {
            hash,
            created_at,
            version: Self::VERSION,
            state_bytes,
        }
    }

    /// Verify the hash and deserialize the captured state.
    pub(crate) fn into_state(self) -> Result<EconomyState, EconomyError> {
        if self.version != Self::VERSION {
            return Err(EconomyError::Snapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if hash_bytes(&self.state_bytes) != self.hash {
            return Err(EconomyError::Snapshot(
                "integrity hash mismatch".to_string(),
            ));
        }
        bincode::deserialize(&self.state_bytes)
            .map_err(|e| EconomyError::Snapshot(e.to_string()))
    }

    /// Write the snapshot to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), EconomyError> {
        let bytes =
            bincode::serialize(self).map_err(|e| EconomyError::Snapshot(e.to_string()))?;
        std::fs::write(path, bytes).map_err(|e| EconomyError::Snapshot(e.to_string()))
    }

    /// Read a snapshot back from a file. Integrity is checked on restore,
    /// not here.
    pub fn load_from_file(path: &Path) -> Result<Self, EconomyError> {
        let bytes = std::fs::read(path).map_err(|e| EconomyError::Snapshot(e.to_string()))?;
        bincode::deserialize(&bytes).map_err(|e| EconomyError::Snapshot(e.to_string()))
    }
}

fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
