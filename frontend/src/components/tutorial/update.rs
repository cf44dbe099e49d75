//! Update function for the tutorial editor component.
//!
//! Elm-style architecture: receives the current `TutorialEditorComponent`
//! state, the `Context`, and a `Msg`, mutates the state accordingly, and
//! returns a `bool` indicating whether the view should re-render.
//!
//! Key behaviors
//! - Manual intake from a `.txt`/`.md` file or the textarea; picking a file
//!   discards any previously generated tutorial.
//! - One generation call in flight at a time; a `Generate` arriving while
//!   pending is dropped instead of racing the first call.
//! - Every edit action applies a pure `common::ops` function to the current
//!   document and swaps the new value in.
//! - Image attachment: hidden input -> file bytes -> base64 `data:` URL ->
//!   the step or list item recorded as the pending target.
//! - PDF export posts a synchronous snapshot of the document and turns the
//!   answer into a fixed-name download.

use gloo_file::{futures::read_as_bytes, futures::read_as_text, Blob};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::tutorial::Tutorial;
use common::ops;
use common::requests::GenerateTutorialRequest;
use gloo_net::http::Request;

use super::helpers::{data_url, show_toast, trigger_download};
use super::messages::Msg;
use super::state::{ImageTarget, TutorialEditorComponent};

/// Uploaded manual files above this size are rejected before reading.
const MAX_MANUAL_FILE_BYTES: f64 = 1024.0 * 1024.0;

const EXPORT_FILENAME: &str = "tutorial-gerado.pdf";

/// Central update function for the component.
pub fn update(
    component: &mut TutorialEditorComponent,
    ctx: &Context<TutorialEditorComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::UpdateManualText(text) => {
            component.manual_text = text;
            true
        }
        Msg::OpenManualFileDialog => {
            if let Some(input) = component.manual_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ManualFileSelected(file) => {
            if file.size() > MAX_MANUAL_FILE_BYTES {
                show_toast("O arquivo é muito grande (limite de 1 MB).");
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_text(&Blob::from(file)).await {
                    Ok(content) => link.send_message(Msg::ManualFileLoaded(content)),
                    Err(e) => link.send_message(Msg::ManualFileFailed(e.to_string())),
                }
            });
            false
        }
        Msg::ManualFileLoaded(content) => {
            component.manual_text = content;
            component.tutorial = None;
            component.error = None;
            true
        }
        Msg::ManualFileFailed(e) => {
            gloo_console::error!("manual file read failed:", e);
            show_toast("Erro ao ler o arquivo.");
            false
        }
        Msg::Generate => {
            if component.generating {
                // One generation in flight at a time.
                return false;
            }
            if component.manual_text.trim().is_empty() {
                component.error =
                    Some("Por favor, carregue ou cole o conteúdo do manual.".to_string());
                return true;
            }

            component.generating = true;
            component.error = None;
            // The previous document is discarded once generation starts and
            // is not restored on failure.
            component.tutorial = None;
            component.step_draft = None;
            component.item_draft = None;

            let request = GenerateTutorialRequest {
                manual_text: component.manual_text.clone(),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/tutorials/generate")
                    .json(&request)
                    .unwrap()
                    .send()
                    .await
                {
                    Ok(response) if response.status() == 200 => {
                        match response.json::<Tutorial>().await {
                            Ok(tutorial) => link.send_message(Msg::GenerationSucceeded(tutorial)),
                            Err(e) => link.send_message(Msg::GenerationFailed(format!(
                                "Ocorreu um erro ao gerar o tutorial: {}. Tente novamente.",
                                e
                            ))),
                        }
                    }
                    Ok(response) => {
                        let message = response.text().await.unwrap_or_default();
                        link.send_message(Msg::GenerationFailed(message));
                    }
                    Err(e) => link.send_message(Msg::GenerationFailed(format!(
                        "Ocorreu um erro ao gerar o tutorial: {}. Tente novamente.",
                        e
                    ))),
                }
            });
            true
        }
        Msg::GenerationSucceeded(tutorial) => {
            component.generating = false;
            component.tutorial = Some(tutorial);
            show_toast("Tutorial gerado com sucesso.");
            true
        }
        Msg::GenerationFailed(message) => {
            component.generating = false;
            component.error = Some(message);
            true
        }

        Msg::InsertStepAfter(after_id) => {
            apply_edit(component, |t| ops::insert_step_after(t, after_id))
        }
        Msg::RemoveStep(step_id) => apply_edit(component, |t| ops::remove_step(t, step_id)),
        Msg::StartStepEdit(step_id) => {
            if let Some(tutorial) = &component.tutorial {
                if let Some(step) = tutorial
                    .installation_steps
                    .iter()
                    .find(|s| s.id == step_id)
                {
                    component.step_draft = Some((step_id, step.description.clone()));
                    return true;
                }
            }
            false
        }
        Msg::UpdateStepDraft(text) => {
            if let Some((_, draft)) = &mut component.step_draft {
                *draft = text;
            }
            false
        }
        Msg::SaveStepEdit => {
            if let Some((step_id, draft)) = component.step_draft.take() {
                return apply_edit(component, |t| {
                    ops::update_step_description(t, step_id, &draft)
                });
            }
            false
        }
        Msg::CancelStepEdit => {
            component.step_draft = None;
            true
        }

        Msg::AddItem(kind) => apply_edit(component, |t| ops::add_item(t, kind)),
        Msg::RemoveItem(kind, id) => apply_edit(component, |t| ops::remove_item(t, kind, id)),
        Msg::StartItemEdit(kind, id) => {
            if let Some(tutorial) = &component.tutorial {
                let list = match kind {
                    common::model::item::ItemKind::Tools => &tutorial.tools_and_items.tools,
                    common::model::item::ItemKind::Items => &tutorial.tools_and_items.items,
                };
                if let Some(item) = list.iter().find(|i| i.id == id) {
                    component.item_draft = Some((kind, id, item.text.clone()));
                    return true;
                }
            }
            false
        }
        Msg::UpdateItemDraft(text) => {
            if let Some((_, _, draft)) = &mut component.item_draft {
                *draft = text;
            }
            false
        }
        Msg::SaveItemEdit => {
            if let Some((kind, id, draft)) = component.item_draft.take() {
                return apply_edit(component, |t| ops::update_item_text(t, kind, id, &draft));
            }
            false
        }
        Msg::CancelItemEdit => {
            component.item_draft = None;
            true
        }

        Msg::OpenImageDialog(target) => {
            component.pending_image_target = Some(target);
            if let Some(input) = component.image_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ImageFileSelected(file) => {
            // Reset so the same file can be picked again later.
            if let Some(input) = component.image_input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            let Some(target) = component.pending_image_target.take() else {
                return false;
            };
            let mime = file.type_();
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_bytes(&Blob::from(file)).await {
                    Ok(bytes) => {
                        link.send_message(Msg::ImageLoaded(target, data_url(&mime, &bytes)));
                    }
                    Err(e) => {
                        gloo_console::error!("image read failed:", e.to_string());
                        show_toast("Erro ao ler a imagem.");
                    }
                }
            });
            false
        }
        Msg::ImageLoaded(target, url) => match target {
            ImageTarget::Step(step_id) => {
                apply_edit(component, |t| ops::update_step_image(t, step_id, &url))
            }
            ImageTarget::Item(kind, id) => {
                apply_edit(component, |t| ops::update_item_image(t, kind, id, &url))
            }
        },

        Msg::ExportPdf => {
            if component.exporting {
                return false;
            }
            // Snapshot taken synchronously before the async render sequence.
            let Some(snapshot) = component.tutorial.clone() else {
                show_toast("Nenhum tutorial para exportar.");
                return false;
            };
            component.exporting = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/tutorials/pdf")
                    .json(&snapshot)
                    .unwrap()
                    .send()
                    .await
                {
                    Ok(response) if response.status() == 200 => match response.binary().await {
                        Ok(bytes) => link.send_message(Msg::ExportSucceeded(bytes)),
                        Err(e) => link.send_message(Msg::ExportFailed(e.to_string())),
                    },
                    Ok(response) => {
                        let message = response.text().await.unwrap_or_default();
                        link.send_message(Msg::ExportFailed(message));
                    }
                    Err(e) => link.send_message(Msg::ExportFailed(e.to_string())),
                }
            });
            true
        }
        Msg::ExportSucceeded(bytes) => {
            component.exporting = false;
            trigger_download(&bytes, EXPORT_FILENAME);
            show_toast("PDF gerado com sucesso.");
            true
        }
        Msg::ExportFailed(message) => {
            component.exporting = false;
            gloo_console::error!("PDF export failed:", message.clone());
            show_toast("Falha ao exportar o PDF. Por favor, tente novamente.");
            true
        }
    }
}

/// Applies a pure edit operation to the current document, if any. Returns
/// whether the view should re-render.
fn apply_edit(
    component: &mut TutorialEditorComponent,
    op: impl FnOnce(&Tutorial) -> Tutorial,
) -> bool {
    match component.tutorial.take() {
        Some(tutorial) => {
            component.tutorial = Some(op(&tutorial));
            true
        }
        None => false,
    }
}
