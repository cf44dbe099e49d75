use serde::{Deserialize, Serialize};

/// Request payload for the tutorial generation endpoint.
/// Carries the raw manual text uploaded or pasted by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTutorialRequest {
    pub manual_text: String,
}
