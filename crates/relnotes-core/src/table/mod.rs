//! Keyed, DOM-equivalent projection of the note list.
//!
//! The table is a pure derivation of the current [`NoteListModel`] contents:
//! a header row rendered once per table lifetime, and one body row per note,
//! keyed by `note-<id>`. Re-renders diff by key instead of rebuilding: rows
//! for notes still present are left in place, entering rows are appended in
//! list order, exiting rows are removed. Rows are never authoritative state;
//! the list model is.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::config::Endpoints;
use crate::markup::{html_escape, Markup, MarkupPipeline};
use crate::models::{Note, NoteId};

/// Fixed column titles, rendered once per table lifetime.
pub const HEADER_TITLES: [&str; 7] = [
    "Edit",
    "Tag",
    "Known issue",
    "Note",
    "Bug",
    "Sort num",
    "Remove",
];

const ROW_KEY_PREFIX: &str = "note-";
const CONTROL_PREFIX: &str = "remove-";

/// Identity of a rendered row (`note-<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(String);

impl RowKey {
    fn for_note(id: NoteId) -> Self {
        Self(format!("{ROW_KEY_PREFIX}{id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of the remove control rendered into a note's row.
#[must_use]
pub fn remove_control_name(id: NoteId) -> String {
    format!("{CONTROL_PREFIX}{ROW_KEY_PREFIX}{id}")
}

/// One table cell: inert text, or markup injected as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Markup(Markup),
}

impl Cell {
    /// The HTML fragment placed inside this cell's `<td>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => html_escape(text),
            Self::Markup(markup) => markup.as_str().to_string(),
        }
    }
}

/// A rendered body row. Derived, regenerable, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: RowKey,
    note_id: NoteId,
    cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn key(&self) -> &RowKey {
        &self.key
    }

    #[must_use]
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// The note table: header, keyed body rows, and the row-key index that maps
/// remove controls back to note ids at click time.
#[derive(Debug, Clone)]
pub struct NoteTable {
    endpoints: Endpoints,
    header: Vec<&'static str>,
    rows: Vec<Row>,
    index: HashMap<RowKey, NoteId>,
}

impl NoteTable {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            header: Vec::new(),
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Header titles; empty until the first render.
    #[must_use]
    pub fn header(&self) -> &[&'static str] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Resolve a remove control name to its note id.
    ///
    /// Resolution goes through the current row index, so the answer reflects
    /// the row-to-note association at invocation time, not render time.
    #[must_use]
    pub fn note_for_control(&self, control_name: &str) -> Option<NoteId> {
        let row_key = control_name.strip_prefix(CONTROL_PREFIX)?;
        self.index.get(&RowKey(row_key.to_string())).copied()
    }

    /// Project the given notes into the table.
    ///
    /// Keyed join: persisting rows keep their position and cells, entering
    /// rows are appended in list order, exiting rows are removed. A
    /// duplicate id later in `notes` joins onto the existing row, so row
    /// keys always form a set.
    pub fn render(&mut self, notes: &[Note], pipeline: &MarkupPipeline) {
        if self.header.is_empty() {
            self.header = HEADER_TITLES.to_vec();
        }

        let mut incoming: Vec<&Note> = Vec::with_capacity(notes.len());
        let mut incoming_keys: HashSet<RowKey> = HashSet::with_capacity(notes.len());
        for note in notes {
            if incoming_keys.insert(RowKey::for_note(note.id)) {
                incoming.push(note);
            }
        }

        // Exit selection first.
        self.rows.retain(|row| incoming_keys.contains(&row.key));
        self.index.retain(|key, _| incoming_keys.contains(key));

        // Enter selection appended in list order; update selection untouched.
        for note in incoming {
            let key = RowKey::for_note(note.id);
            if self.index.contains_key(&key) {
                continue;
            }
            let row = self.build_row(note, pipeline);
            self.index.insert(key, note.id);
            self.rows.push(row);
        }
    }

    fn build_row(&self, note: &Note, pipeline: &MarkupPipeline) -> Row {
        let bug_cell = note.bug.map_or(Cell::Empty, |bug| {
            let url = self.endpoints.bug_url(bug);
            Cell::Markup(Markup::from_trusted(format!(
                r#"<a href="{url}">{bug}</a>"#
            )))
        });
        let sort_num_cell = note
            .sort_num
            .map_or(Cell::Empty, |sort_num| Cell::Text(sort_num.to_string()));

        let edit_url = self.endpoints.edit_url(note.id);
        let cells = vec![
            Cell::Markup(Markup::from_trusted(format!(
                r#"<a href="{edit_url}">Edit</a>"#
            ))),
            Cell::Text(note.tag.clone()),
            Cell::Text(note.is_known_issue.to_string()),
            Cell::Markup(pipeline.markup(&note.note)),
            bug_cell,
            sort_num_cell,
            Cell::Markup(Markup::from_trusted(format!(
                r#"<input type="button" name="{}" value="Remove">"#,
                remove_control_name(note.id)
            ))),
        ];

        Row {
            key: RowKey::for_note(note.id),
            note_id: note.id,
            cells,
        }
    }

    /// Project the current table state to an HTML `<table>` fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, r#"<table id="note-table">"#);

        if !self.header.is_empty() {
            output.push_str("<tr>");
            for title in &self.header {
                let _ = write!(output, "<th>{}</th>", html_escape(title));
            }
            output.push_str("</tr>\n");
        }

        for row in &self.rows {
            let _ = write!(output, r#"<tr id="{}">"#, row.key.as_str());
            for cell in &row.cells {
                let _ = write!(output, "<td>{}</td>", cell.to_html());
            }
            output.push_str("</tr>\n");
        }

        output.push_str("</table>\n");
        output
    }
}
