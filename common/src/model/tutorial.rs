use serde::{Deserialize, Serialize};

use crate::model::item::EditableItem;
use crate::model::step::Step;

/// The root generated document.
///
/// A `Tutorial` is born whole from one successful generation call, lives only
/// in memory, and is replaced wholesale by the next generation. All mutation
/// goes through the pure functions in [`crate::ops`], which take the current
/// value and return a new one, so the UI can detect changes structurally.
///
/// Field names are serialized in camelCase to match the generation service
/// schema and the frontend/backend wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    /// Identity of the equipment the manual describes.
    pub equipment: Equipment,
    /// The two editable lists: tools and other items/materials.
    pub tools_and_items: ToolsAndItems,
    /// Ordered installation steps. Display numbering is positional.
    pub installation_steps: Vec<Step>,
    pub safety_precautions: Vec<String>,
    pub testing_procedures: TestingProcedures,
    pub results_interpretation: Vec<String>,
    pub final_recommendations: Vec<String>,
    /// Read-only after generation; there are no FAQ edit operations.
    pub faq: Vec<FaqItem>,
    /// Next id handed out by `ops::insert_step_after`. Monotonic: removals
    /// never decrease it, so a deleted step id is never resurrected.
    pub next_step_id: u32,
    /// Next id for the tools list (see `next_step_id`).
    pub next_tool_id: u32,
    /// Next id for the items list (see `next_step_id`).
    pub next_item_id: u32,
}

/// Free-text identification of the equipment (name, model code, application).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub name: String,
    pub model: String,
    pub application: String,
}

/// The two independently ordered, independently identified editable lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsAndItems {
    pub tools: Vec<EditableItem>,
    pub items: Vec<EditableItem>,
}

/// Titled list of procedures for testing the installed equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingProcedures {
    pub title: String,
    pub steps: Vec<String>,
}

/// One question/answer pair of the generated FAQ section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::step::Step;

    #[test]
    fn serializes_with_camel_case_field_names() {
        let tutorial = Tutorial {
            equipment: Equipment {
                name: "Bomba A".to_string(),
                model: "BA-100".to_string(),
                application: "Irrigação".to_string(),
            },
            tools_and_items: ToolsAndItems {
                tools: vec![],
                items: vec![],
            },
            installation_steps: vec![Step {
                id: 1,
                description: "Conecte a mangueira".to_string(),
                image_url: None,
            }],
            safety_precautions: vec![],
            testing_procedures: TestingProcedures {
                title: "Testes".to_string(),
                steps: vec![],
            },
            results_interpretation: vec![],
            final_recommendations: vec![],
            faq: vec![],
            next_step_id: 2,
            next_tool_id: 1,
            next_item_id: 1,
        };

        let json = serde_json::to_string(&tutorial).unwrap();
        assert!(json.contains("\"installationSteps\""));
        assert!(json.contains("\"toolsAndItems\""));
        assert!(json.contains("\"imageUrl\":null"));
        assert!(json.contains("\"safetyPrecautions\""));
        assert!(json.contains("\"nextStepId\":2"));
    }
}
