//! Component state for the tutorial editor.
//!
//! The editor owns the single in-memory document: the raw manual text, the
//! generated `Tutorial` (or `None` before the first successful generation),
//! the pending flags for the two asynchronous boundaries (generation and PDF
//! export), and the transient edit drafts.

use yew::prelude::*;

use common::model::item::ItemKind;
use common::model::tutorial::Tutorial;

/// Where a chosen image file should be attached once it has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Step(u32),
    Item(ItemKind, u32),
}

/// Main state container for the `TutorialEditorComponent`.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct TutorialEditorComponent {
    /// Raw manual text, from an uploaded file or pasted into the textarea.
    pub manual_text: String,

    /// The current document. `None` until a generation succeeds; replaced
    /// wholesale on every new generation; mutated only through `common::ops`.
    pub tutorial: Option<Tutorial>,

    /// True while a generation call is in flight. Guards re-submission:
    /// there is never more than one pending generation.
    pub generating: bool,

    /// True while a PDF export is in flight.
    pub exporting: bool,

    /// User-visible error from validation or a failed generation.
    pub error: Option<String>,

    /// In-progress step description edit: `(step id, draft text)`.
    pub step_draft: Option<(u32, String)>,

    /// In-progress list item edit: `(list, item id, draft text)`.
    pub item_draft: Option<(ItemKind, u32, String)>,

    /// Hidden file input for the manual (.txt/.md).
    pub manual_input_ref: NodeRef,

    /// Hidden file input shared by all image-attachment buttons.
    pub image_input_ref: NodeRef,

    /// Target of the image pick currently in progress, set when the hidden
    /// input is opened and consumed when the file arrives.
    pub pending_image_target: Option<ImageTarget>,
}

impl TutorialEditorComponent {
    pub fn new() -> Self {
        Self {
            manual_text: String::new(),
            tutorial: None,
            generating: false,
            exporting: false,
            error: None,
            step_draft: None,
            item_draft: None,
            manual_input_ref: Default::default(),
            image_input_ref: Default::default(),
            pending_image_target: None,
        }
    }
}
