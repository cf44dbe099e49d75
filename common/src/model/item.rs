use serde::{Deserialize, Serialize};

/// One entry of the tools or materials list, with an optional illustrative photo.
///
/// Ids are only unique within their own list: a tool and a material may share
/// the same numeric id without any relation between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableItem {
    pub id: u32,
    pub text: String,
    /// `data:` URL of a locally attached image; `None` until the user adds one.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Selects one of the two independently identified editable lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// The tools list ("Ferramentas").
    Tools,
    /// The materials list ("Outros Itens").
    Items,
}
