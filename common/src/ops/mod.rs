//! Pure edit operations over the tutorial document.
//!
//! Every function takes the current [`Tutorial`](crate::model::tutorial::Tutorial)
//! by reference and returns the updated document; the caller swaps the new
//! value in. Operations that address a missing id return an unchanged clone:
//! they never panic and never touch sibling entries.

mod items;
mod steps;

pub use items::{add_item, remove_item, update_item_image, update_item_text};
pub use steps::{insert_step_after, remove_step, update_step_description, update_step_image};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::item::EditableItem;
    use crate::model::step::Step;
    use crate::model::tutorial::{Equipment, TestingProcedures, ToolsAndItems, Tutorial};

    pub fn step(id: u32, description: &str) -> Step {
        Step {
            id,
            description: description.to_string(),
            image_url: None,
        }
    }

    pub fn item(id: u32, text: &str) -> EditableItem {
        EditableItem {
            id,
            text: text.to_string(),
            image_url: None,
        }
    }

    /// Three steps, two tools and two items, with counters already seeded.
    pub fn sample_tutorial() -> Tutorial {
        Tutorial {
            equipment: Equipment {
                name: "Bomba Submersa".to_string(),
                model: "BS-200".to_string(),
                application: "Drenagem".to_string(),
            },
            tools_and_items: ToolsAndItems {
                tools: vec![item(1, "Chave de fenda"), item(2, "Alicate")],
                items: vec![item(1, "Fita isolante"), item(2, "Abraçadeira")],
            },
            installation_steps: vec![
                step(1, "Desligue a energia"),
                step(2, "Posicione a bomba"),
                step(3, "Conecte a mangueira"),
            ],
            safety_precautions: vec!["Use luvas".to_string()],
            testing_procedures: TestingProcedures {
                title: "Ensaios".to_string(),
                steps: vec!["Ligue por 10 segundos".to_string()],
            },
            results_interpretation: vec!["Fluxo constante indica sucesso".to_string()],
            final_recommendations: vec!["Limpe o filtro mensalmente".to_string()],
            faq: vec![],
            next_step_id: 4,
            next_tool_id: 3,
            next_item_id: 3,
        }
    }
}
