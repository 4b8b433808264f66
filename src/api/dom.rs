//! DOM mount and read-back of the visual tree
//!
//! `mount_view` writes a [`SongView`] into a container element, replacing
//! its children. `read_view` walks the container back into a `SongView` so
//! the scraper sees exactly what the page shows. Missing letter or chord
//! nodes read as absent slots.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::html_layout::display_list::*;

const DATA_EDITABLE: &str = "editable";
const DATA_INTERACTIVE: &str = "interactive";

/// Replace the container's children with the rendered view
pub fn mount_view(view: &SongView, container: &Element) -> Result<(), JsValue> {
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;

    container.set_inner_html("");
    container.set_attribute("data-editable", if view.editable { "true" } else { "false" })?;

    for line in &view.lines {
        let row = create_div(&document, &line.classes)?;
        write_dataset(&row, &line.dataset)?;
        if let Some(height) = line.height {
            row.style().set_property("height", &format!("{}rem", height))?;
        }

        for cell in &line.cells {
            let wrapper = create_div(&document, &cell.classes)?;
            write_dataset(&wrapper, &cell.dataset)?;
            if cell.interactive {
                wrapper.dataset().set(DATA_INTERACTIVE, "true")?;
            }

            if let Some(slot) = &cell.chord {
                let chord = create_div(&document, &slot.classes)?;
                chord.set_text_content(Some(&slot.text));
                chord.set_draggable(slot.draggable);
                wrapper.append_child(&chord)?;
            }
            if let Some(slot) = &cell.letter {
                let letter = create_div(&document, &[CLASS_LETTER.to_string()])?;
                letter.set_text_content(Some(&slot.text));
                wrapper.append_child(&letter)?;
            }

            row.append_child(&wrapper)?;
        }

        container.append_child(&row)?;
    }

    Ok(())
}

/// Read the container back into a view
pub fn read_view(container: &Element) -> Result<SongView, JsValue> {
    let editable = container.get_attribute("data-editable").as_deref() == Some("true");
    let rows = container.query_selector_all(&format!(".{}", CLASS_LINE))?;
    let mut lines = Vec::with_capacity(rows.length() as usize);

    for row_idx in 0..rows.length() {
        let Some(row) = rows.get(row_idx).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };

        let dataset = read_dataset(&row, &[DATA_LINE_INDEX]);
        let line_index = dataset
            .get(DATA_LINE_INDEX)
            .and_then(|v| v.parse().ok())
            .unwrap_or(row_idx as usize);
        let height = row
            .style()
            .get_property_value("height")
            .ok()
            .and_then(|h| h.strip_suffix("rem").and_then(|v| v.parse().ok()));

        let wrappers = row.query_selector_all(&format!(".{}", CLASS_CELL))?;
        let mut cells = Vec::with_capacity(wrappers.length() as usize);
        for cell_idx in 0..wrappers.length() {
            let Some(wrapper) = wrappers.get(cell_idx).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            cells.push(read_cell(&wrapper));
        }

        lines.push(RenderLine {
            line_index,
            classes: class_list(&row),
            dataset,
            cells,
            height,
        });
    }

    Ok(SongView { editable, lines })
}

fn read_cell(wrapper: &HtmlElement) -> RenderCell {
    let mut dataset = read_dataset(wrapper, &[DATA_LINE_INDEX, DATA_CHAR_INDEX, DATA_EOL, DATA_INTERACTIVE]);
    let interactive = dataset.remove(DATA_INTERACTIVE).as_deref() == Some("true");

    let chord = child(wrapper, CLASS_CHORD).map(|el| ChordSlot {
        text: el.text_content().unwrap_or_default(),
        classes: class_list(&el),
        draggable: el.dyn_ref::<HtmlElement>().is_some_and(|html| html.draggable()),
    });
    let letter = child(wrapper, CLASS_LETTER).map(|el| LetterSlot {
        text: el.text_content().unwrap_or_default(),
    });

    RenderCell {
        classes: class_list(wrapper),
        dataset,
        chord,
        letter,
        interactive,
    }
}

/// Add or remove a class on one mounted cell wrapper; every node stays in place
pub fn toggle_cell_class(
    container: &Element,
    line_index: usize,
    char_index: usize,
    class: &str,
    on: bool,
) -> Result<(), JsValue> {
    match find_cell(container, line_index, char_index)? {
        Some(cell) => set_class(&cell, class, on),
        None => Ok(()),
    }
}

/// Same as [`toggle_cell_class`], on the cell's chord node
pub fn toggle_chord_class(
    container: &Element,
    line_index: usize,
    char_index: usize,
    class: &str,
    on: bool,
) -> Result<(), JsValue> {
    match find_cell(container, line_index, char_index)?.and_then(|cell| child(&cell, CLASS_CHORD)) {
        Some(chord) => set_class(&chord, class, on),
        None => Ok(()),
    }
}

/// Remove a class from every node of the container that carries it
pub fn clear_class(container: &Element, class: &str) -> Result<(), JsValue> {
    let nodes = container.query_selector_all(&format!(".{}", class))?;
    for idx in 0..nodes.length() {
        if let Some(el) = nodes.get(idx).and_then(|node| node.dyn_into::<Element>().ok()) {
            el.class_list().remove_1(class)?;
        }
    }
    Ok(())
}

fn find_cell(container: &Element, line_index: usize, char_index: usize) -> Result<Option<Element>, JsValue> {
    container.query_selector(&format!(
        ".{}[data-line-index=\"{}\"][data-char-index=\"{}\"]",
        CLASS_CELL, line_index, char_index
    ))
}

fn set_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    if on {
        el.class_list().add_1(class)
    } else {
        el.class_list().remove_1(class)
    }
}

fn create_div(document: &Document, classes: &[String]) -> Result<HtmlElement, JsValue> {
    let el = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    el.set_class_name(&classes.join(" "));
    Ok(el)
}

fn write_dataset(el: &HtmlElement, dataset: &HashMap<String, String>) -> Result<(), JsValue> {
    let map = el.dataset();
    for (key, value) in dataset {
        map.set(key, value)?;
    }
    Ok(())
}

fn read_dataset(el: &HtmlElement, keys: &[&str]) -> HashMap<String, String> {
    let map = el.dataset();
    keys.iter()
        .filter_map(|key| map.get(key).map(|value| (key.to_string(), value)))
        .collect()
}

fn class_list(el: &Element) -> Vec<String> {
    el.class_name().split_whitespace().map(String::from).collect()
}

fn child(parent: &Element, class: &str) -> Option<Element> {
    parent.query_selector(&format!(".{}", class)).ok().flatten()
}
