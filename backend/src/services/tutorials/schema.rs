//! Output contract with the structured-generation service.
//!
//! The service is asked for JSON matching [`response_schema`]: the tutorial
//! shape without any image fields, with tools and items as plain strings and
//! steps as `{id, description}` pairs. [`RawTutorial`] mirrors that shape;
//! [`RawTutorial::into_tutorial`] repairs it into the editable document model
//! by renumbering the steps, injecting empty image placeholders, lifting the
//! string lists into identified `EditableItem` records and seeding the id
//! counters.

use serde::Deserialize;
use serde_json::{json, Value};

use common::model::item::EditableItem;
use common::model::step::Step;
use common::model::tutorial::{Equipment, FaqItem, TestingProcedures, ToolsAndItems, Tutorial};

/// Strict response schema sent alongside the prompt, in the generation
/// service's schema dialect.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "equipment": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Nome completo do equipamento." },
                    "model": { "type": "STRING", "description": "Código ou modelo do equipamento." },
                    "application": { "type": "STRING", "description": "Aplicação principal do equipamento." },
                },
            },
            "toolsAndItems": {
                "type": "OBJECT",
                "properties": {
                    "tools": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Lista de ferramentas necessárias." },
                    "items": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Lista de outros itens ou materiais necessários." },
                },
            },
            "installationSteps": {
                "type": "ARRAY",
                "description": "Passos detalhados de instalação. Cada passo deve ser uma descrição clara e concisa.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "INTEGER", "description": "Número sequencial do passo." },
                        "description": { "type": "STRING", "description": "Descrição detalhada do passo de instalação." },
                    },
                },
            },
            "safetyPrecautions": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Precauções de segurança essenciais." },
            "testingProcedures": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING", "description": "Título para a seção de testes/ensaios." },
                    "steps": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Passos para testar o equipamento." },
                },
            },
            "resultsInterpretation": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Orientações para interpretar os resultados dos testes." },
            "finalRecommendations": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Recomendações finais de uso e manutenção." },
            "faq": {
                "type": "ARRAY",
                "description": "Perguntas e respostas frequentes para iniciantes.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "answer": { "type": "STRING" },
                    },
                },
            },
        },
    })
}

/// The tutorial exactly as the generation service answers it. Every field is
/// required: an answer missing one does not parse and is reported as a
/// malformed response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTutorial {
    pub equipment: Equipment,
    pub tools_and_items: RawToolsAndItems,
    pub installation_steps: Vec<RawStep>,
    pub safety_precautions: Vec<String>,
    pub testing_procedures: TestingProcedures,
    pub results_interpretation: Vec<String>,
    pub final_recommendations: Vec<String>,
    pub faq: Vec<FaqItem>,
}

/// Tools and items as the service produces them: plain strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToolsAndItems {
    pub tools: Vec<String>,
    pub items: Vec<String>,
}

/// A step as the service produces it: no image field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStep {
    pub id: u32,
    pub description: String,
}

fn lift_items(texts: Vec<String>) -> Vec<EditableItem> {
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| EditableItem {
            id: index as u32 + 1,
            text,
            image_url: None,
        })
        .collect()
}

impl RawTutorial {
    /// Repairs the parsed service answer into a complete `Tutorial`. Steps
    /// keep the order the service's ids describe but are renumbered from 1,
    /// so duplicate or oversized service ids never reach the document.
    pub fn into_tutorial(self) -> Tutorial {
        let mut raw_steps = self.installation_steps;
        raw_steps.sort_by_key(|step| step.id);
        let installation_steps: Vec<Step> = raw_steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step {
                id: index as u32 + 1,
                description: step.description,
                image_url: None,
            })
            .collect();
        let next_step_id = installation_steps.len() as u32 + 1;
        let tools = lift_items(self.tools_and_items.tools);
        let items = lift_items(self.tools_and_items.items);
        let next_tool_id = tools.len() as u32 + 1;
        let next_item_id = items.len() as u32 + 1;

        Tutorial {
            equipment: self.equipment,
            tools_and_items: ToolsAndItems { tools, items },
            installation_steps,
            safety_precautions: self.safety_precautions,
            testing_procedures: self.testing_procedures,
            results_interpretation: self.results_interpretation,
            final_recommendations: self.final_recommendations,
            faq: self.faq,
            next_step_id,
            next_tool_id,
            next_item_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> String {
        json!({
            "equipment": { "name": "Bomba A", "model": "BA-1", "application": "Irrigação" },
            "toolsAndItems": { "tools": ["Chave inglesa"], "items": ["Fita veda-rosca", "Abraçadeira"] },
            "installationSteps": [
                { "id": 1, "description": "Conecte a mangueira" },
                { "id": 2, "description": "Fixe a bomba" }
            ],
            "safetyPrecautions": ["Desligue a energia"],
            "testingProcedures": { "title": "Ensaios", "steps": ["Ligue por 10 segundos"] },
            "resultsInterpretation": ["Fluxo constante indica sucesso"],
            "finalRecommendations": ["Limpe o filtro"],
            "faq": [{ "question": "Precisa de eletricista?", "answer": "Recomendado." }]
        })
        .to_string()
    }

    #[test]
    fn schema_names_all_top_level_sections() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in [
            "equipment",
            "toolsAndItems",
            "installationSteps",
            "safetyPrecautions",
            "testingProcedures",
            "resultsInterpretation",
            "finalRecommendations",
            "faq",
        ] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
        // The service has no notion of images.
        let step_fields = &schema["properties"]["installationSteps"]["items"]["properties"];
        assert!(step_fields.get("imageUrl").is_none());
    }

    #[test]
    fn repair_injects_image_placeholders_on_every_step() {
        let raw: RawTutorial = serde_json::from_str(&sample_payload()).unwrap();
        let tutorial = raw.into_tutorial();
        assert_eq!(tutorial.installation_steps.len(), 2);
        assert!(tutorial
            .installation_steps
            .iter()
            .all(|step| step.image_url.is_none()));
        assert_eq!(tutorial.installation_steps[0].description, "Conecte a mangueira");
    }

    #[test]
    fn repair_lifts_string_lists_into_identified_items() {
        let raw: RawTutorial = serde_json::from_str(&sample_payload()).unwrap();
        let tutorial = raw.into_tutorial();

        let tools = &tutorial.tools_and_items.tools;
        let items = &tutorial.tools_and_items.items;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, 1);
        assert_eq!(tools[0].text, "Chave inglesa");
        assert!(tools[0].image_url.is_none());
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn repair_seeds_id_counters_past_every_existing_id() {
        let raw: RawTutorial = serde_json::from_str(&sample_payload()).unwrap();
        let tutorial = raw.into_tutorial();
        assert_eq!(tutorial.next_step_id, 3);
        assert_eq!(tutorial.next_tool_id, 2);
        assert_eq!(tutorial.next_item_id, 3);
    }

    #[test]
    fn repair_renumbers_steps_even_at_the_service_id_ceiling() {
        let mut payload: Value = serde_json::from_str(&sample_payload()).unwrap();
        payload["installationSteps"] = json!([
            { "id": u32::MAX, "description": "Fixe a bomba" }
        ]);
        let raw: RawTutorial = serde_json::from_value(payload).unwrap();
        let tutorial = raw.into_tutorial();
        assert_eq!(tutorial.installation_steps[0].id, 1);
        assert_eq!(tutorial.next_step_id, 2);
    }

    #[test]
    fn repair_renumbers_duplicate_and_unordered_service_step_ids() {
        let mut payload: Value = serde_json::from_str(&sample_payload()).unwrap();
        payload["installationSteps"] = json!([
            { "id": 7, "description": "Aperte os parafusos" },
            { "id": 7, "description": "Teste a vedação" },
            { "id": 2, "description": "Posicione a bomba" }
        ]);
        let raw: RawTutorial = serde_json::from_value(payload).unwrap();
        let tutorial = raw.into_tutorial();

        let ids: Vec<u32> = tutorial.installation_steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // Order follows the service ids; equal ids keep their answer order.
        let descriptions: Vec<&str> = tutorial
            .installation_steps
            .iter()
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec!["Posicione a bomba", "Aperte os parafusos", "Teste a vedação"]
        );
        assert_eq!(tutorial.next_step_id, 4);
    }

    #[test]
    fn payload_missing_a_required_section_does_not_parse() {
        let truncated = json!({
            "equipment": { "name": "Bomba A", "model": "BA-1", "application": "Irrigação" },
            "installationSteps": []
        })
        .to_string();
        assert!(serde_json::from_str::<RawTutorial>(&truncated).is_err());
    }

    #[test]
    fn non_json_payload_does_not_parse() {
        assert!(serde_json::from_str::<RawTutorial>("desculpe, não consegui").is_err());
    }
}
