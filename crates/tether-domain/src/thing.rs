use garde::Validate;
use serde::{Deserialize, Serialize};

/// A device registered on the platform.
///
/// The owner is resolved from the caller's credential and never crosses the
/// wire in either direction. The device key authenticates the device itself
/// on the data plane and is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Thing {
    #[serde(default)]
    #[garde(skip)]
    pub id: String,

    #[serde(skip)]
    #[garde(skip)]
    pub owner: String,

    #[serde(default)]
    #[garde(skip)]
    pub key: String,

    #[garde(length(min = 1))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub metadata: Option<serde_json::Value>,
}
