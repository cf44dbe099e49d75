use crate::model::item::{EditableItem, ItemKind};
use crate::model::tutorial::Tutorial;

fn list_mut(tutorial: &mut Tutorial, kind: ItemKind) -> &mut Vec<EditableItem> {
    match kind {
        ItemKind::Tools => &mut tutorial.tools_and_items.tools,
        ItemKind::Items => &mut tutorial.tools_and_items.items,
    }
}

fn take_next_id(tutorial: &mut Tutorial, kind: ItemKind) -> u32 {
    let counter = match kind {
        ItemKind::Tools => &mut tutorial.next_tool_id,
        ItemKind::Items => &mut tutorial.next_item_id,
    };
    let id = *counter;
    *counter += 1;
    id
}

/// Appends a new empty entry to the named list with a fresh id from that
/// list's own counter. Tools and items never share a counter, so a numeric
/// collision between the two lists is meaningless.
pub fn add_item(tutorial: &Tutorial, kind: ItemKind) -> Tutorial {
    let mut updated = tutorial.clone();
    let id = take_next_id(&mut updated, kind);
    list_mut(&mut updated, kind).push(EditableItem {
        id,
        text: String::new(),
        image_url: None,
    });
    updated
}

/// Removes the entry with `id` from the named list only. Idempotent; the
/// other list is never touched.
pub fn remove_item(tutorial: &Tutorial, kind: ItemKind, id: u32) -> Tutorial {
    let mut updated = tutorial.clone();
    list_mut(&mut updated, kind).retain(|item| item.id != id);
    updated
}

/// Replaces the text of the entry with `id` in the named list, trimmed.
/// No-op when the id is absent from that list.
pub fn update_item_text(tutorial: &Tutorial, kind: ItemKind, id: u32, text: &str) -> Tutorial {
    let mut updated = tutorial.clone();
    if let Some(item) = list_mut(&mut updated, kind).iter_mut().find(|i| i.id == id) {
        item.text = text.trim().to_string();
    }
    updated
}

/// Sets or replaces the attached image of the entry with `id` in the named list.
pub fn update_item_image(tutorial: &Tutorial, kind: ItemKind, id: u32, data_url: &str) -> Tutorial {
    let mut updated = tutorial.clone();
    if let Some(item) = list_mut(&mut updated, kind).iter_mut().find(|i| i.id == id) {
        item.image_url = Some(data_url.to_string());
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::sample_tutorial;

    #[test]
    fn add_item_assigns_a_fresh_id_within_its_own_list() {
        let after = add_item(&sample_tutorial(), ItemKind::Tools);
        let tools = &after.tools_and_items.tools;
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[2].id, 3);
        assert_eq!(tools[2].text, "");
        assert_eq!(tools[2].image_url, None);
        // The items list keeps its own counter untouched.
        assert_eq!(after.next_item_id, 3);
    }

    #[test]
    fn removing_a_tool_does_not_affect_the_item_with_the_same_id() {
        let after = remove_item(&sample_tutorial(), ItemKind::Tools, 2);
        assert_eq!(after.tools_and_items.tools.len(), 1);
        assert!(after.tools_and_items.items.iter().any(|i| i.id == 2));
    }

    #[test]
    fn remove_item_twice_is_idempotent() {
        let once = remove_item(&sample_tutorial(), ItemKind::Items, 1);
        let twice = remove_item(&once, ItemKind::Items, 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn item_ids_are_never_reused_after_removal() {
        let mut tutorial = sample_tutorial();
        tutorial = remove_item(&tutorial, ItemKind::Tools, 2);
        tutorial = add_item(&tutorial, ItemKind::Tools);
        let new_id = tutorial.tools_and_items.tools.last().unwrap().id;
        assert_eq!(new_id, 3);
    }

    #[test]
    fn update_item_text_trims_and_stays_in_its_list() {
        let after = update_item_text(&sample_tutorial(), ItemKind::Items, 2, "  Parafusos  ");
        assert_eq!(after.tools_and_items.items[1].text, "Parafusos");
        // The tool with the same id keeps its text.
        assert_eq!(after.tools_and_items.tools[1].text, "Alicate");
    }

    #[test]
    fn update_item_text_on_missing_id_is_a_noop() {
        let before = sample_tutorial();
        let after = update_item_text(&before, ItemKind::Tools, 77, "x");
        assert_eq!(after, before);
    }

    #[test]
    fn update_item_image_overwrites_previous_image() {
        let first = update_item_image(&sample_tutorial(), ItemKind::Tools, 1, "data:image/png;base64,AA");
        let second = update_item_image(&first, ItemKind::Tools, 1, "data:image/png;base64,BB");
        assert_eq!(
            second.tools_and_items.tools[0].image_url.as_deref(),
            Some("data:image/png;base64,BB")
        );
    }
}
