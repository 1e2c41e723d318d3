//! Outline table (`#work_outline`) rows, shared by both layouts.

use dlsenc_core::RawFieldMap;
use dlsenc_core::labels::separator_for;

use super::document::{Document, element_text, select_text, selector};

/// Read every outline row into `fields`, replacing earlier values for the same label.
///
/// A row contributes the text of each `a`/`div` inside its value cells, or
/// the whole cell text when there are none. Rows without a label, without a
/// value cell, or without any text are skipped.
pub(crate) fn collect_outline(doc: &Document, fields: &mut RawFieldMap) {
    let cell_selector = selector("td");
    let value_selector = selector("a, div");

    for row in doc.select("#work_outline tr") {
        let label = select_text(row, "th");
        if label.is_empty() {
            continue;
        }

        let cells: Vec<_> = row.select(&cell_selector).collect();
        if cells.is_empty() {
            continue;
        }

        let mut values: Vec<String> = cells
            .iter()
            .flat_map(|cell| cell.select(&value_selector))
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();

        if values.is_empty() {
            let text = cells.iter().flat_map(|cell| cell.text()).collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                values.push(text.to_string());
            }
        }

        if let Some(value) = join_values(&label, values) {
            fields.insert(label, value);
        }
    }
}

/// Join the values found under `label`, `None` when there are none.
pub(crate) fn join_values(label: &str, mut values: Vec<String>) -> Option<String> {
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(values.join(separator_for(label))),
    }
}
