//! Acknowledgement bodies.

use serde::{Deserialize, Serialize};

/// Body returned by delete endpoints.
///
/// A `success: false` acknowledgement is a logical failure reported with a
/// 2xx status, distinct from a transport or HTTP error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default = "default_success")]
    pub success: bool,
}

const fn default_success() -> bool {
    true
}
