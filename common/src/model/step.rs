use serde::{Deserialize, Serialize};

/// One ordered installation instruction with an optional illustrative photo.
///
/// `id` is the stable identity assigned when the step is created and is never
/// reused after removal. The number shown to the user is the 1-based position
/// in `installation_steps`, computed at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: u32,
    pub description: String,
    /// `data:` URL of a locally attached image; `None` until the user adds one.
    #[serde(default)]
    pub image_url: Option<String>,
}
