//! View rendering for the tutorial editor component.
//!
//! The page is split into the intake panel (file upload / textarea / generate
//! button) and, once a document exists, the editable tutorial: the two
//! tool/item lists, the numbered installation steps with per-step edit,
//! insert, remove and photo affordances, and the read-only generated
//! sections (safety, testing, results, recommendations, FAQ).
//!
//! Step numbers are the 1-based position in the list, not the step id.
//! All user-facing text is in Portuguese.

use web_sys::{DragEvent, Event, HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::model::item::{EditableItem, ItemKind};
use common::model::step::Step;
use common::model::tutorial::Tutorial;

use super::messages::Msg;
use super::state::{ImageTarget, TutorialEditorComponent};

/// Main view function: intake panel on top, tutorial below once generated.
pub fn view(component: &TutorialEditorComponent, ctx: &Context<TutorialEditorComponent>) -> Html {
    let link = ctx.link();

    html! {
        <main class="container">
            <header class="hero">
                <h1>{"Gerador de Tutoriais de Instalação"}</h1>
                <p>{"Transforme um manual técnico em um tutorial passo a passo, editável e exportável em PDF."}</p>
            </header>

            { build_intake_panel(component, link) }

            {
                if component.generating {
                    html! { <div class="spinner" aria-label="Gerando tutorial">{"Gerando tutorial..."}</div> }
                } else {
                    html! {}
                }
            }

            {
                if let Some(tutorial) = &component.tutorial {
                    build_tutorial(component, link, tutorial)
                } else {
                    html! {}
                }
            }
        </main>
    }
}

/// File drop zone, hidden file input, paste textarea and the generate button.
fn build_intake_panel(component: &TutorialEditorComponent, link: &Scope<TutorialEditorComponent>) -> Html {
    let ondrop = link.batch_callback(|e: DragEvent| {
        e.prevent_default();
        e.data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
            .map(Msg::ManualFileSelected)
    });
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());

    html! {
        <section class="panel">
            <div
                class="drop-zone"
                onclick={link.callback(|_| Msg::OpenManualFileDialog)}
                {ondrop}
                {ondragover}
            >
                <p><span class="accent">{"Carregue um arquivo"}</span>{" ou arraste e solte aqui"}</p>
                <p class="hint">{"Apenas arquivos .txt ou .md"}</p>
            </div>
            <input
                type="file"
                accept=".txt,.md,text/plain"
                class="hidden"
                ref={component.manual_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    input.files().and_then(|files| files.get(0)).map(Msg::ManualFileSelected)
                })}
            />
            <textarea
                class="manual-input"
                value={component.manual_text.clone()}
                placeholder="...ou cole o conteúdo do manual aqui."
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::UpdateManualText(input.value())
                })}
            />
            <div class="actions">
                <button
                    class="primary"
                    disabled={component.generating || component.manual_text.trim().is_empty()}
                    onclick={link.callback(|_| Msg::Generate)}
                >
                    { if component.generating { "Gerando..." } else { "Gerar Tutorial" } }
                </button>
            </div>
            {
                if let Some(error) = &component.error {
                    html! { <p class="error">{ error }</p> }
                } else {
                    html! {}
                }
            }
        </section>
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() { placeholder } else { value }
}

/// The generated document with all edit affordances, plus the export button
/// and the shared hidden image input.
fn build_tutorial(
    component: &TutorialEditorComponent,
    link: &Scope<TutorialEditorComponent>,
    tutorial: &Tutorial,
) -> Html {
    html! {
        <section class="tutorial">
            <div class="actions">
                <button
                    class="export"
                    disabled={component.exporting}
                    onclick={link.callback(|_| Msg::ExportPdf)}
                >
                    { if component.exporting { "Exportando..." } else { "Baixar Tutorial como PDF" } }
                </button>
            </div>

            <input
                type="file"
                accept="image/*"
                class="hidden"
                ref={component.image_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    input.files().and_then(|files| files.get(0)).map(Msg::ImageFileSelected)
                })}
            />

            <article class="document">
                <header class="document-header">
                    <h1>{ or_placeholder(&tutorial.equipment.name, "Tutorial") }</h1>
                    <p class="model">{ or_placeholder(&tutorial.equipment.model, "Modelo") }</p>
                    <p class="application">{ or_placeholder(&tutorial.equipment.application, "Aplicação") }</p>
                </header>

                <section class="section">
                    <h2>{"Itens e Ferramentas Necessárias"}</h2>
                    <div class="two-columns">
                        { build_item_list(component, link, ItemKind::Tools, "Ferramentas", &tutorial.tools_and_items.tools, "Adicionar Ferramenta") }
                        { build_item_list(component, link, ItemKind::Items, "Outros Itens", &tutorial.tools_and_items.items, "Adicionar Item") }
                    </div>
                </section>

                <section class="section">
                    <h2>{"Passos de Instalação"}</h2>
                    <div class="steps">
                        {
                            tutorial.installation_steps.iter().enumerate()
                                .map(|(index, step)| build_step(component, link, index, step))
                                .collect::<Html>()
                        }
                    </div>
                </section>

                { build_string_list("Precauções de Segurança", &tutorial.safety_precautions) }

                <section class="section">
                    <h2>{ or_placeholder(&tutorial.testing_procedures.title, "Procedimentos de Teste") }</h2>
                    <ol>
                        { tutorial.testing_procedures.steps.iter().map(|s| html! { <li>{ s }</li> }).collect::<Html>() }
                    </ol>
                </section>

                { build_string_list("Interpretação dos Resultados", &tutorial.results_interpretation) }
                { build_string_list("Recomendações Finais", &tutorial.final_recommendations) }

                <section class="section">
                    <h2>{"Perguntas Frequentes (FAQ)"}</h2>
                    <div class="faq">
                        {
                            tutorial.faq.iter().map(|entry| html! {
                                <div class="faq-entry">
                                    <h4>{ &entry.question }</h4>
                                    <p>{ &entry.answer }</p>
                                </div>
                            }).collect::<Html>()
                        }
                    </div>
                </section>
            </article>
        </section>
    }
}

/// One of the two editable lists with its add button.
fn build_item_list(
    component: &TutorialEditorComponent,
    link: &Scope<TutorialEditorComponent>,
    kind: ItemKind,
    title: &str,
    items: &[EditableItem],
    add_label: &str,
) -> Html {
    html! {
        <div class="item-list">
            <h3>{ title }</h3>
            <ul>
                { items.iter().map(|item| build_item_entry(component, link, kind, item)).collect::<Html>() }
                <li class="add-entry">
                    <button onclick={link.callback(move |_| Msg::AddItem(kind))}>
                        { format!("+ {}", add_label) }
                    </button>
                </li>
            </ul>
        </div>
    }
}

/// One tool/item row: text or edit draft, plus photo/edit/remove buttons.
fn build_item_entry(
    component: &TutorialEditorComponent,
    link: &Scope<TutorialEditorComponent>,
    kind: ItemKind,
    item: &EditableItem,
) -> Html {
    let id = item.id;
    let editing = matches!(&component.item_draft, Some((k, i, _)) if *k == kind && *i == id);

    html! {
        <li class="item-entry" key={format!("{:?}-{}", kind, id)}>
            {
                if editing {
                    let draft = component
                        .item_draft
                        .as_ref()
                        .map(|(_, _, text)| text.clone())
                        .unwrap_or_default();
                    html! {
                        <div class="edit-box">
                            <textarea
                                rows={2}
                                value={draft}
                                oninput={link.callback(|e: InputEvent| {
                                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                                    Msg::UpdateItemDraft(input.value())
                                })}
                            />
                            <div class="edit-actions">
                                <button onclick={link.callback(|_| Msg::CancelItemEdit)}>{"Cancelar"}</button>
                                <button class="primary" onclick={link.callback(|_| Msg::SaveItemEdit)}>{"Salvar"}</button>
                            </div>
                        </div>
                    }
                } else {
                    html! {
                        <>
                            <span class="item-text">{ &item.text }</span>
                            <span class="row-actions">
                                <button
                                    title="Adicionar imagem"
                                    onclick={link.callback(move |_| Msg::OpenImageDialog(ImageTarget::Item(kind, id)))}
                                >{"📷"}</button>
                                <button
                                    title="Editar item"
                                    onclick={link.callback(move |_| Msg::StartItemEdit(kind, id))}
                                >{"✎"}</button>
                                <button
                                    title="Remover item"
                                    onclick={link.callback(move |_| Msg::RemoveItem(kind, id))}
                                >{"🗑"}</button>
                            </span>
                        </>
                    }
                }
            }
            {
                if let Some(url) = &item.image_url {
                    html! { <img class="item-image" src={url.clone()} alt={format!("Imagem para {}", item.text)} /> }
                } else {
                    html! {}
                }
            }
        </li>
    }
}

/// One installation step: positional number badge, description (or its edit
/// draft), the photo slot, and the insert-after/remove controls.
fn build_step(
    component: &TutorialEditorComponent,
    link: &Scope<TutorialEditorComponent>,
    index: usize,
    step: &Step,
) -> Html {
    let id = step.id;
    let editing = matches!(&component.step_draft, Some((s, _)) if *s == id);

    html! {
        <div class="step" key={id.to_string()}>
            <div class="step-number">{ index + 1 }</div>
            <div class="step-body">
                {
                    if editing {
                        let draft = component
                            .step_draft
                            .as_ref()
                            .map(|(_, text)| text.clone())
                            .unwrap_or_default();
                        html! {
                            <div class="edit-box">
                                <textarea
                                    rows={4}
                                    value={draft}
                                    oninput={link.callback(|e: InputEvent| {
                                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                                        Msg::UpdateStepDraft(input.value())
                                    })}
                                />
                                <div class="edit-actions">
                                    <button onclick={link.callback(|_| Msg::CancelStepEdit)}>{"Cancelar"}</button>
                                    <button class="primary" onclick={link.callback(|_| Msg::SaveStepEdit)}>{"Salvar"}</button>
                                </div>
                            </div>
                        }
                    } else {
                        html! {
                            <p class="step-description" ondblclick={link.callback(move |_| Msg::StartStepEdit(id))}>
                                { &step.description }
                            </p>
                        }
                    }
                }
                <div class="step-actions">
                    <button onclick={link.callback(move |_| Msg::StartStepEdit(id))}>{"Editar"}</button>
                    <button onclick={link.callback(move |_| Msg::InsertStepAfter(id))}>{"Adicionar passo abaixo"}</button>
                    <button onclick={link.callback(move |_| Msg::RemoveStep(id))}>{"Remover passo"}</button>
                </div>
            </div>
            <div class="step-photo">
                {
                    if let Some(url) = &step.image_url {
                        html! {
                            <img
                                src={url.clone()}
                                alt={format!("Ilustração para o passo {}", index + 1)}
                                onclick={link.callback(move |_| Msg::OpenImageDialog(ImageTarget::Step(id)))}
                            />
                        }
                    } else {
                        html! {
                            <div
                                class="photo-placeholder"
                                role="button"
                                onclick={link.callback(move |_| Msg::OpenImageDialog(ImageTarget::Step(id)))}
                            >
                                { "Clique para adicionar uma foto ilustrativa" }
                            </div>
                        }
                    }
                }
            </div>
        </div>
    }
}

/// A read-only bulleted section.
fn build_string_list(title: &str, entries: &[String]) -> Html {
    html! {
        <section class="section">
            <h2>{ title }</h2>
            <ul>
                { entries.iter().map(|entry| html! { <li>{ entry }</li> }).collect::<Html>() }
            </ul>
        </section>
    }
}
