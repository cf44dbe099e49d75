use crate::model::step::Step;
use crate::model::tutorial::Tutorial;

/// Inserts a new empty step immediately after the step with id `after_id`.
///
/// The new step gets a fresh id from the document's monotonic counter, an
/// empty description and no image. If `after_id` is the last step the new
/// one is appended; if it does not exist the document is returned unchanged.
pub fn insert_step_after(tutorial: &Tutorial, after_id: u32) -> Tutorial {
    let mut updated = tutorial.clone();
    let Some(pos) = updated
        .installation_steps
        .iter()
        .position(|step| step.id == after_id)
    else {
        return updated;
    };

    let step = Step {
        id: updated.next_step_id,
        description: String::new(),
        image_url: None,
    };
    updated.next_step_id += 1;
    updated.installation_steps.insert(pos + 1, step);
    updated
}

/// Removes the step with id `step_id`. Removing an absent id is a no-op, so
/// the operation is idempotent. Remaining step ids are untouched; display
/// numbering is recomputed positionally by the view.
pub fn remove_step(tutorial: &Tutorial, step_id: u32) -> Tutorial {
    let mut updated = tutorial.clone();
    updated.installation_steps.retain(|step| step.id != step_id);
    updated
}

/// Replaces the description of the step with id `step_id`, trimming
/// surrounding whitespace. No-op when the id is absent.
pub fn update_step_description(tutorial: &Tutorial, step_id: u32, text: &str) -> Tutorial {
    let mut updated = tutorial.clone();
    if let Some(step) = updated
        .installation_steps
        .iter_mut()
        .find(|step| step.id == step_id)
    {
        step.description = text.trim().to_string();
    }
    updated
}

/// Sets or replaces the attached image of the step with id `step_id`.
pub fn update_step_image(tutorial: &Tutorial, step_id: u32, data_url: &str) -> Tutorial {
    let mut updated = tutorial.clone();
    if let Some(step) = updated
        .installation_steps
        .iter_mut()
        .find(|step| step.id == step_id)
    {
        step.image_url = Some(data_url.to_string());
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::sample_tutorial;

    fn ids(tutorial: &Tutorial) -> Vec<u32> {
        tutorial.installation_steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn insert_after_grows_by_one_and_preserves_relative_order() {
        let before = sample_tutorial();
        let after = insert_step_after(&before, 1);

        assert_eq!(after.installation_steps.len(), before.installation_steps.len() + 1);
        assert_eq!(ids(&after), vec![1, 4, 2, 3]);
        assert_eq!(after.installation_steps[1].description, "");
        assert_eq!(after.installation_steps[1].image_url, None);
    }

    #[test]
    fn insert_after_last_step_appends() {
        let after = insert_step_after(&sample_tutorial(), 3);
        assert_eq!(ids(&after), vec![1, 2, 3, 4]);
    }

    #[test]
    fn insert_after_missing_id_is_a_noop() {
        let before = sample_tutorial();
        let after = insert_step_after(&before, 99);
        assert_eq!(after, before);
    }

    #[test]
    fn inserted_ids_are_never_reused_after_removal() {
        let mut tutorial = sample_tutorial();
        let mut seen = ids(&tutorial);

        for _ in 0..5 {
            tutorial = insert_step_after(&tutorial, 1);
            let new_id = tutorial.installation_steps[1].id;
            assert!(!seen.contains(&new_id));
            seen.push(new_id);
            tutorial = remove_step(&tutorial, new_id);
        }
    }

    #[test]
    fn remove_step_twice_is_idempotent() {
        let once = remove_step(&sample_tutorial(), 2);
        let twice = remove_step(&once, 2);
        assert_eq!(once, twice);
        assert_eq!(ids(&twice), vec![1, 3]);
    }

    #[test]
    fn remove_does_not_renumber_remaining_ids() {
        let after = remove_step(&sample_tutorial(), 1);
        assert_eq!(ids(&after), vec![2, 3]);
    }

    #[test]
    fn update_description_stores_trimmed_text() {
        let after = update_step_description(&sample_tutorial(), 2, "  Nivele a base  \n");
        assert_eq!(after.installation_steps[1].description, "Nivele a base");
    }

    #[test]
    fn update_description_on_missing_id_is_a_noop() {
        let before = sample_tutorial();
        let after = update_step_description(&before, 42, "texto");
        assert_eq!(after, before);
    }

    #[test]
    fn update_image_overwrites_previous_image() {
        let first = update_step_image(&sample_tutorial(), 3, "data:image/png;base64,AAAA");
        let second = update_step_image(&first, 3, "data:image/png;base64,BBBB");
        assert_eq!(
            second.installation_steps[2].image_url.as_deref(),
            Some("data:image/png;base64,BBBB")
        );
    }
}
