//! FORGE Core - Entity Types
//!
//! Pure data structures with no I/O. All other crates depend on this.
//! The only behavior here is the artifact parser, a total function over
//! the raw completion text.

pub mod artifact;
pub mod entities;
pub mod error;

pub use artifact::Artifact;
pub use entities::{NewProject, ProjectRecord};
pub use error::{
    ConfigError, ForgeError, ForgeResult, LlmError, StorageError, ValidationError,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Record identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type RecordId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 RecordId (timestamp-sortable).
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}
