use actix_web::{web, HttpResponse, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use genpdf::elements::{Break, Image as PdfImage, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document};
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::error::Error;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use common::model::item::EditableItem;
use common::model::tutorial::{Equipment, Tutorial};

// A4 portrait
const PAGE_WIDTH_MM: f64 = 210.0;
const MARGIN_MM: f64 = 10.0;
const IMAGE_DPI: f64 = 150.0;

/// `POST /api/tutorials/pdf` handler. The payload is a synchronous snapshot
/// of the current document; rendering never mutates it, so a failure here
/// leaves the editor state untouched.
pub async fn process(payload: web::Json<Tutorial>) -> impl Responder {
    match render_tutorial_pdf(&payload) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                "inline; filename=\"tutorial-gerado.pdf\"",
            ))
            .body(bytes),
        Err(e) => {
            log::error!("PDF export failed: {}", e);
            HttpResponse::ServiceUnavailable().body(format!("Falha ao exportar o PDF: {}", e))
        }
    }
}

/// Load the font family (adjust path/name if needed).
fn load_font() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, Box<dyn Error>> {
    if let Ok(family) = genpdf::fonts::from_files("./fonts", "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files("./fonts", "LiberationSans", None).map_err(Into::into)
}

/// Configure and return a genpdf Document with font and decorator set.
/// genpdf's default page size is A4 portrait, which is the fixed export size.
fn configure_document(title: &str) -> Result<Document, Box<dyn Error>> {
    let font_family = load_font()?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.set_font_size(10);
    doc.set_line_spacing(1.2f64);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn push_header(doc: &mut Document, equipment: &Equipment) {
    doc.push(
        Paragraph::new(StyledString::new(
            or_placeholder(&equipment.name, "Tutorial"),
            Style::new().bold().with_font_size(20),
        ))
        .aligned(Alignment::Center),
    );
    doc.push(
        Paragraph::new(StyledString::new(
            or_placeholder(&equipment.model, "Modelo"),
            Style::new().with_font_size(13),
        ))
        .aligned(Alignment::Center),
    );
    doc.push(
        Paragraph::new(StyledString::new(
            or_placeholder(&equipment.application, "Aplicação"),
            Style::new().italic().with_font_size(11),
        ))
        .aligned(Alignment::Center),
    );
    doc.push(Break::new(2));
}

fn push_section_title(doc: &mut Document, title: &str) {
    doc.push(Break::new(1));
    doc.push(Paragraph::new(StyledString::new(
        title,
        Style::new().bold().with_font_size(14),
    )));
    doc.push(Break::new(1));
}

fn push_subsection_title(doc: &mut Document, title: &str) {
    doc.push(Paragraph::new(StyledString::new(
        title,
        Style::new().bold().with_font_size(12),
    )));
}

fn push_bullet(doc: &mut Document, text: &str) {
    doc.push(Paragraph::new(format!("• {}", text)));
}

fn push_editable_items(
    doc: &mut Document,
    items: &[EditableItem],
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<(), Box<dyn Error>> {
    for item in items {
        push_bullet(doc, &item.text);
        if let Some(data_url) = &item.image_url {
            push_data_url_image(doc, temp_files, data_url)?;
        }
    }
    Ok(())
}

/// Decodes an embeddable `data:<mime>;base64,<payload>` reference produced by
/// the frontend's local file reads.
fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    if !data_url.starts_with("data:") {
        return None;
    }
    let (_, payload) = data_url.split_once(";base64,")?;
    BASE64.decode(payload.trim()).ok()
}

/// Embeds an attached image. The bytes are rescaled to fit the printable
/// width of an A4 page (capped at roughly the on-screen preview size),
/// flattened over white, and written to a temp PNG that must stay alive
/// until `doc.render` has run.
fn push_data_url_image(
    doc: &mut Document,
    temp_files: &mut Vec<NamedTempFile>,
    data_url: &str,
) -> Result<(), Box<dyn Error>> {
    let Some(bytes) = decode_data_url(data_url) else {
        doc.push(Paragraph::new("[imagem inválida]"));
        return Ok(());
    };

    let content_width_in = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / 25.4;
    let content_target_px = content_width_in * IMAGE_DPI;

    // Match the on-screen limits: max-width/max-height of 240 CSS px,
    // converted to image pixels at IMAGE_DPI assuming 96 CSS px per inch.
    let css_to_px = IMAGE_DPI / 96.0;
    let css_max_target_px = 240.0 * css_to_px;

    let img = load_from_memory(&bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let orig_w_f = orig_w as f64;
    let orig_h_f = orig_h as f64;

    let scale_by_content = (content_target_px / orig_w_f).min(1.0);
    let scale_by_css_w = (css_max_target_px / orig_w_f).min(1.0);
    let scale_by_css_h = (css_max_target_px / orig_h_f).min(1.0);
    let scale = scale_by_content.min(scale_by_css_w).min(scale_by_css_h);

    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w_f * scale).max(1.0).round() as u32;
        let new_h = (orig_h_f * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    // Flatten alpha channel over white background and convert to RGB
    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let rgb_image = DynamicImage::ImageRgba8(background).to_rgb8();
    let raw = rgb_image.into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }

    let path: PathBuf = tmp.path().to_path_buf();
    let mut img_elem = PdfImage::from_path(path)?;
    img_elem.set_dpi(IMAGE_DPI);
    temp_files.push(tmp);
    doc.push(img_elem);
    Ok(())
}

/// Renders the tutorial snapshot into PDF bytes, walking the sections in the
/// same order the editor displays them.
pub fn render_tutorial_pdf(tutorial: &Tutorial) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut doc = configure_document(or_placeholder(&tutorial.equipment.name, "Tutorial"))?;

    // Keep temporary image files alive until rendering finishes
    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    push_header(&mut doc, &tutorial.equipment);

    push_section_title(&mut doc, "Itens e Ferramentas Necessárias");
    push_subsection_title(&mut doc, "Ferramentas");
    push_editable_items(&mut doc, &tutorial.tools_and_items.tools, &mut temp_files)?;
    push_subsection_title(&mut doc, "Outros Itens");
    push_editable_items(&mut doc, &tutorial.tools_and_items.items, &mut temp_files)?;

    push_section_title(&mut doc, "Passos de Instalação");
    for (index, step) in tutorial.installation_steps.iter().enumerate() {
        doc.push(Paragraph::new(StyledString::new(
            format!("Passo {}", index + 1),
            Style::new().bold().with_font_size(12),
        )));
        doc.push(Paragraph::new(step.description.as_str()));
        if let Some(data_url) = &step.image_url {
            push_data_url_image(&mut doc, &mut temp_files, data_url)?;
        }
        doc.push(Break::new(1));
    }

    push_section_title(&mut doc, "Precauções de Segurança");
    for precaution in &tutorial.safety_precautions {
        push_bullet(&mut doc, precaution);
    }

    push_section_title(
        &mut doc,
        or_placeholder(&tutorial.testing_procedures.title, "Procedimentos de Teste"),
    );
    for (index, step) in tutorial.testing_procedures.steps.iter().enumerate() {
        doc.push(Paragraph::new(format!("{}. {}", index + 1, step)));
    }

    push_section_title(&mut doc, "Interpretação dos Resultados");
    for result in &tutorial.results_interpretation {
        push_bullet(&mut doc, result);
    }

    push_section_title(&mut doc, "Recomendações Finais");
    for recommendation in &tutorial.final_recommendations {
        push_bullet(&mut doc, recommendation);
    }

    push_section_title(&mut doc, "Perguntas Frequentes (FAQ)");
    for entry in &tutorial.faq {
        doc.push(Paragraph::new(StyledString::new(
            entry.question.as_str(),
            Style::new().bold(),
        )));
        doc.push(Paragraph::new(entry.answer.as_str()));
        doc.push(Break::new(1));
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;

    // temp_files dropped and cleaned up here
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_data_url_extracts_the_base64_payload() {
        let decoded = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[test]
    fn decode_data_url_rejects_non_data_references() {
        assert!(decode_data_url("https://example.com/foto.png").is_none());
        assert!(decode_data_url("data:image/png,sem-base64").is_none());
        assert!(decode_data_url("data:image/png;base64,***").is_none());
    }

    #[test]
    fn empty_equipment_fields_fall_back_to_placeholders() {
        assert_eq!(or_placeholder("", "Tutorial"), "Tutorial");
        assert_eq!(or_placeholder("   ", "Modelo"), "Modelo");
        assert_eq!(or_placeholder("Bomba A", "Tutorial"), "Bomba A");
    }
}
