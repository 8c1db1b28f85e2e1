//! Picking one workspace or database out of a Baserow listing.

use anyhow::{anyhow, Result};
use baserow_tools::{Application, Workspace};
use dialoguer::{theme::ColorfulTheme, FuzzySelect};

/// Anything listed by Baserow with an id and a name.
pub trait Selectable {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl Selectable for Workspace {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Selectable for Application {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Finds the item with the given id. An id that isn't in the list is an invalid choice.
pub fn choose_by_id<T: Selectable>(items: &[T], id: i64) -> Result<&T> {
    items.iter().find(|item| item.id() == id).ok_or_else(|| anyhow!("Invalid choice: there is no item with id {id}"))
}

/// A single item is chosen without asking.
pub fn auto_select<T: Selectable>(items: &[T]) -> Option<&T> {
    match items {
        [only] => Some(only),
        _ => None,
    }
}

/// Picks an item, from `preset` if given, automatically if there's only one, and otherwise by asking. Escaping the
/// prompt counts as an invalid choice.
pub fn select<'a, T: Selectable>(kind: &str, items: &'a [T], preset: Option<i64>) -> Result<&'a T> {
    if items.is_empty() {
        return Err(anyhow!("No {kind} found"));
    }
    if let Some(id) = preset {
        return choose_by_id(items, id);
    }
    if let Some(item) = auto_select(items) {
        println!("Using {kind} {} (ID: {})", item.name(), item.id());
        return Ok(item);
    }
    let options = items.iter().map(|i| format!("{} (ID: {})", i.name(), i.id())).collect::<Vec<String>>();
    let index = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Select a {kind}"))
        .items(&options)
        .interact_opt()?
        .ok_or_else(|| anyhow!("Invalid choice"))?;
    Ok(&items[index])
}
