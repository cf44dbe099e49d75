use std::fmt;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use common::model::tutorial::Tutorial;
use common::requests::GenerateTutorialRequest;

use super::schema::{self, RawTutorial};
use crate::config::GenerationConfig;

const GEMINI_MODEL: &str = "gemini-2.5-pro";
const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// `POST /api/tutorials/generate` handler. Validates before any upstream
/// call; on failure the previous document is simply not replaced (the
/// frontend already cleared it when the call started).
pub async fn process(
    config: web::Data<GenerationConfig>,
    payload: web::Json<GenerateTutorialRequest>,
) -> impl Responder {
    let manual_text = match validate_manual_text(&payload.manual_text) {
        Ok(text) => text,
        Err(message) => return HttpResponse::BadRequest().body(message),
    };

    match generate_tutorial(&config, manual_text).await {
        Ok(tutorial) => HttpResponse::Ok().json(tutorial),
        Err(e) => {
            log::error!("tutorial generation failed: {}", e);
            error_response(&e)
        }
    }
}

/// Failure modes of one generation round trip. `Unavailable` means the
/// service could not be used at all; `Malformed` means it answered but the
/// answer does not satisfy the declared output contract.
#[derive(Debug)]
enum GenerationError {
    Unavailable(String),
    Malformed(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Unavailable(detail) | GenerationError::Malformed(detail) => {
                f.write_str(detail)
            }
        }
    }
}

/// 502 for a contract-violating answer, 503 when the service was unreachable
/// or answered with an error status.
fn error_response(e: &GenerationError) -> HttpResponse {
    let body = format!("Ocorreu um erro ao gerar o tutorial: {}", e);
    match e {
        GenerationError::Malformed(_) => HttpResponse::BadGateway().body(body),
        GenerationError::Unavailable(_) => HttpResponse::ServiceUnavailable().body(body),
    }
}

/// Rejects trimmed-empty manual text. Returns the trimmed text so the prompt
/// never carries leading or trailing whitespace.
fn validate_manual_text(manual_text: &str) -> Result<&str, String> {
    let trimmed = manual_text.trim();
    if trimmed.is_empty() {
        Err("Por favor, carregue ou cole o conteúdo do manual.".to_string())
    } else {
        Ok(trimmed)
    }
}

/// One blocking round trip to the generation service: prompt + strict output
/// schema in, schema-conformant JSON text out, repaired into a `Tutorial`.
async fn generate_tutorial(
    config: &GenerationConfig,
    manual_text: &str,
) -> Result<Tutorial, GenerationError> {
    let body = json!({
        "contents": [{ "parts": [{ "text": build_prompt(manual_text) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema::response_schema(),
        },
    });

    let url = format!(
        "{}/{}:generateContent?key={}",
        GEMINI_ENDPOINT, GEMINI_MODEL, config.api_key
    );
    let response = config
        .http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            GenerationError::Unavailable(format!("falha ao contatar o serviço de geração: {}", e))
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        return Err(GenerationError::Unavailable(format!(
            "o serviço de geração respondeu {}: {}",
            status, detail
        )));
    }

    let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
        GenerationError::Malformed(format!("resposta inválida do serviço de geração: {}", e))
    })?;
    let generated_json = envelope.candidate_text().ok_or_else(|| {
        GenerationError::Malformed("o serviço de geração não retornou conteúdo".to_string())
    })?;

    let raw: RawTutorial = serde_json::from_str(&generated_json)
        .map_err(|e| GenerationError::Malformed(format!("resposta fora do schema declarado: {}", e)))?;
    Ok(raw.into_tutorial())
}

/// Fixed Portuguese instruction template combined with the manual body. The
/// eight numbered sections mirror the fields of the output schema.
fn build_prompt(manual_text: &str) -> String {
    format!(
        "Analise o seguinte manual técnico e gere um tutorial completo e passo a passo em \
         PORTUGUÊS, em linguagem clara e acessível para leigos.\n\
         O resultado DEVE ser um objeto JSON válido que siga estritamente o schema fornecido.\n\
         O tutorial deve incluir:\n\
         1. Identificação do equipamento (nome, modelo, aplicação).\n\
         2. Lista de ferramentas e itens necessários.\n\
         3. Passos de instalação simplificados e detalhados.\n\
         4. Precauções de segurança.\n\
         5. Procedimentos para testar/ensaiar o equipamento.\n\
         6. Orientações para interpretar os resultados.\n\
         7. Recomendações finais.\n\
         8. Uma seção de FAQ com perguntas e respostas para iniciantes.\n\n\
         Manual:\n---\n{}\n---",
        manual_text
    )
}

/// Envelope of the generation service's HTTP answer. Only the first
/// candidate's text parts are of interest.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn candidate_text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_input_is_rejected_before_any_call() {
        assert!(validate_manual_text("").is_err());
        assert!(validate_manual_text("   \n\t  ").is_err());
    }

    #[test]
    fn valid_input_is_trimmed() {
        assert_eq!(validate_manual_text("  Equipamento X  ").unwrap(), "Equipamento X");
    }

    #[test]
    fn prompt_embeds_the_manual_and_the_language_instruction() {
        let prompt = build_prompt("Equipamento X funciona a 220V.");
        assert!(prompt.contains("PORTUGUÊS"));
        assert!(prompt.contains("Equipamento X funciona a 220V."));
        assert!(prompt.contains("8. Uma seção de FAQ"));
    }

    #[test]
    fn candidate_text_joins_the_first_candidates_parts() {
        let envelope: GenerateContentResponse = serde_json::from_str(
            r#"{ "candidates": [ { "content": { "parts": [ { "text": "{\"a\":" }, { "text": "1}" } ] } } ] }"#,
        )
        .unwrap();
        assert_eq!(envelope.candidate_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn empty_envelope_yields_no_candidate_text() {
        let envelope: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.candidate_text().is_none());
    }

    #[test]
    fn contract_violations_and_outages_map_to_distinct_statuses() {
        use actix_web::http::StatusCode;

        let malformed =
            GenerationError::Malformed("resposta fora do schema declarado".to_string());
        assert_eq!(error_response(&malformed).status(), StatusCode::BAD_GATEWAY);

        let unavailable =
            GenerationError::Unavailable("falha ao contatar o serviço de geração".to_string());
        assert_eq!(
            error_response(&unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
