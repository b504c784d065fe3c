//! The blank daily-note template and the meaningfulness check against it.

use chrono::NaiveDate;

use crate::store::NoteStore;

/// Body of a freshly created, untouched daily note.
pub const NOTE_TEMPLATE: &str = "

## Today's focus
- [ ]

## One thing that moves my main goal forward


## Progress log
-

## Notes / thoughts
";

/// The empty checkbox in "Today's focus" that carried tasks are inserted before.
const FOCUS_CHECKBOX: &str = "- [ ]";

/// True when `body` differs from the template, ignoring surrounding whitespace.
pub fn is_meaningful_content(body: &str) -> bool {
    body.trim() != NOTE_TEMPLATE.trim()
}

/// True when a note exists for `date` and has content beyond the blank template.
pub fn is_meaningful(store: &dyn NoteStore, date: NaiveDate) -> bool {
    super::read_or_absent(store, date).is_some_and(|body| is_meaningful_content(&body))
}

/// Template body with `carried` tasks spliced in as `- [ ] <text>` lines.
///
/// The lines go immediately before the first `- [ ]` in the template, once.
/// With nothing carried the template is returned verbatim.
pub fn render_new_note(carried: &[String]) -> String {
    if carried.is_empty() {
        return NOTE_TEMPLATE.to_string();
    }

    let task_lines = carried
        .iter()
        .map(|task| format!("- [ ] {task}"))
        .collect::<Vec<_>>()
        .join("\n");
    NOTE_TEMPLATE.replacen(FOCUS_CHECKBOX, &format!("{task_lines}\n{FOCUS_CHECKBOX}"), 1)
}
