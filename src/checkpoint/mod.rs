//! Serializable machine snapshots.
//!
//! A checkpoint captures the state tag, transition history, and metadata
//! of a machine so an operator console can persist and inspect it across
//! process restarts. Session data (card, PIN, account) is never part of a
//! checkpoint: customer secrets do not outlive the process.

use crate::core::{AtmState, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Operational metadata tracked by the machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineMetadata {
    /// When the machine was constructed
    pub created_at: DateTime<Utc>,

    /// Last transition time
    pub updated_at: DateTime<Utc>,

    /// Completed customer transactions (returns from `EjectingCard` to
    /// `Idle`)
    pub customers_served: usize,
}

impl Default for MachineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            customers_served: 0,
        }
    }
}

/// Snapshot of a machine at a point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When the checkpoint was taken
    pub timestamp: DateTime<Utc>,

    /// State the machine was constructed in
    pub initial_state: AtmState,

    /// State the machine was in when the checkpoint was taken
    pub current_state: AtmState,

    /// Complete transition history
    pub history: StateHistory,

    /// Machine metadata
    pub metadata: MachineMetadata,
}

impl Checkpoint {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Checkpoint = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from binary, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }

    fn validate_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AtmEvent, StateTransition};

    fn sample_checkpoint() -> Checkpoint {
        let history = StateHistory::new().record(StateTransition {
            from: AtmState::Initializing,
            to: AtmState::Idle,
            trigger: AtmEvent::Initialized,
            timestamp: Utc::now(),
        });
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: "cp-1".to_string(),
            timestamp: Utc::now(),
            initial_state: AtmState::Initializing,
            current_state: AtmState::Idle,
            history,
            metadata: MachineMetadata::default(),
        }
    }

    #[test]
    fn json_roundtrip_preserves_the_snapshot() {
        let checkpoint = sample_checkpoint();
        let json = checkpoint.to_json().unwrap();
        let restored = Checkpoint::from_json(&json).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.current_state, AtmState::Idle);
        assert_eq!(restored.history, checkpoint.history);
    }

    #[test]
    fn binary_roundtrip_preserves_the_snapshot() {
        let checkpoint = sample_checkpoint();
        let bytes = checkpoint.to_bytes().unwrap();
        let restored = Checkpoint::from_bytes(&bytes).unwrap();

        assert_eq!(restored.current_state, AtmState::Idle);
        assert_eq!(restored.history, checkpoint.history);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut checkpoint = sample_checkpoint();
        checkpoint.version = 2;
        let json = checkpoint.to_json().unwrap();

        let result = Checkpoint::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 2,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = Checkpoint::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
