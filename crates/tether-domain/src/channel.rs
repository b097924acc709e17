use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::thing::Thing;

/// A communication group that things publish and subscribe on.
///
/// The connectivity relation is materialized on the channel side as the
/// `connected` collection; it changes only through the connect and
/// disconnect operations, never through a create or update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Channel {
    #[serde(default)]
    #[garde(skip)]
    pub id: String,

    #[serde(skip)]
    #[garde(skip)]
    pub owner: String,

    #[garde(length(min = 1))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub metadata: Option<serde_json::Value>,

    #[serde(default)]
    #[garde(skip)]
    pub connected: Vec<Thing>,
}
