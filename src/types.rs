use serde::{Deserialize, Serialize};

/// One unit of the retry chain: which object to correlate and how many
/// search attempts are left. Recreated with a decremented counter on every
/// reschedule; the counter never goes back up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTask {
    pub object_id: String,
    pub attempts_remaining: u32,
}

/// Single status entry from the instance search API.
///
/// `uri` is the canonical ActivityPub identifier compared against the local
/// object id. Other fields of the API payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub uri: String,
}

/// Response shape of `GET /api/v2/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
}
