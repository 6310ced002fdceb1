//! Grouping of the category document's sections.

use crate::types::{Category, Section};

/// Fold a category-pass section list into categories.
///
/// A level-2 section opens a category and each following level-3 section is
/// appended to it. Level-3 sections seen before the first category, and
/// sections at any other level, are dropped. Categories sharing an id are
/// kept apart.
#[must_use]
pub fn group_categories(sections: &[Section]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for section in sections {
        match section.level {
            2 => categories.push(Category {
                id: section.id.clone(),
                title: section.title.clone(),
                keywords: Vec::new(),
            }),
            3 => match categories.last_mut() {
                Some(open) => open.keywords.push(section.clone()),
                None => tracing::debug!(id = %section.id, "keyword outside any category"),
            },
            _ => {},
        }
    }

    categories
}
