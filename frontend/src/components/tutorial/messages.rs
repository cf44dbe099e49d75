use common::model::item::ItemKind;
use common::model::tutorial::Tutorial;

use super::state::ImageTarget;

#[derive(Clone)]
pub enum Msg {
    // Manual intake
    UpdateManualText(String),
    OpenManualFileDialog,
    ManualFileSelected(web_sys::File),
    ManualFileLoaded(String),
    ManualFileFailed(String),

    // Generation
    Generate,
    GenerationSucceeded(Tutorial),
    GenerationFailed(String),

    // Step edits
    InsertStepAfter(u32),
    RemoveStep(u32),
    StartStepEdit(u32),
    UpdateStepDraft(String),
    SaveStepEdit,
    CancelStepEdit,

    // Tool/item list edits
    AddItem(ItemKind),
    RemoveItem(ItemKind, u32),
    StartItemEdit(ItemKind, u32),
    UpdateItemDraft(String),
    SaveItemEdit,
    CancelItemEdit,

    // Image attachment
    OpenImageDialog(ImageTarget),
    ImageFileSelected(web_sys::File),
    ImageLoaded(ImageTarget, String),

    // PDF export
    ExportPdf,
    ExportSucceeded(Vec<u8>),
    ExportFailed(String),
}
