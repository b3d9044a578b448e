use crate::domain::model::{DeckEntry, PickItem, SelectionOutcome};
use crate::domain::ports::Prompt;
use crate::utils::error::Result;

/// Renders one deck entry for the picker. The count summary appears
/// only when the stat fetch succeeded; a missing stat renders the bare
/// name, never a placeholder.
fn pick_item(entry: &DeckEntry) -> PickItem {
    PickItem {
        label: entry.name.clone(),
        description: entry.stat.map(|stat| {
            format!(
                "{} new / {} learn / {} review",
                stat.new_count, stat.learn_count, stat.review_count
            )
        }),
    }
}

/// Presents the entries and suspends until the user picks one or
/// dismisses the prompt. Dismissal is `Cancelled`, a normal outcome.
pub async fn select(prompt: &dyn Prompt, entries: Vec<DeckEntry>) -> Result<SelectionOutcome> {
    let items = entries.iter().map(pick_item).collect();
    match prompt.pick(items).await? {
        Some(index) if index < entries.len() => {
            let entry = entries.into_iter().nth(index);
            match entry {
                Some(entry) => Ok(SelectionOutcome::Chosen(entry)),
                None => Ok(SelectionOutcome::Cancelled),
            }
        }
        _ => Ok(SelectionOutcome::Cancelled),
    }
}
