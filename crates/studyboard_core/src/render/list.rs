//! Per-kind list views.
//!
//! # Responsibility
//! - Produce the filtered, ordered, numbered text representation of one
//!   collection, with kind-specific item formatting.
//!
//! # Invariants
//! - `render` output is derived from `visible` so frontends can map line
//!   numbers back to record ids.
//! - Empty filtered results produce the kind's placeholder text.

use crate::model::kind::{field, EntityKind, KindSpec, Priority};
use crate::model::record::Record;
use crate::render::order::order_for_display;
use crate::render::surface::Surface;
use crate::search::filter::filter_records;
use chrono::DateTime;
use std::fmt::Write as _;

/// Renderer for one entity kind's list region.
#[derive(Debug, Clone, Copy)]
pub struct ListView {
    spec: &'static KindSpec,
}

impl ListView {
    pub fn new(kind: EntityKind) -> Self {
        Self { spec: kind.spec() }
    }

    pub fn kind(&self) -> EntityKind {
        self.spec.kind
    }

    /// Returns the records visible under `query`, in display order.
    pub fn visible(&self, records: &[Record], query: &str) -> Vec<Record> {
        let mut visible = filter_records(records, self.spec, query);
        order_for_display(self.spec, &mut visible);
        visible
    }

    /// Renders the filtered list, or the kind's empty-state placeholder.
    pub fn render(&self, records: &[Record], query: &str) -> String {
        let visible = self.visible(records, query);
        if visible.is_empty() {
            return self.empty_state().to_string();
        }

        let mut out = String::new();
        for (position, record) in visible.iter().enumerate() {
            if position > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{}. {}", position + 1, self.format_item(record));
        }
        out
    }

    /// Renders into `surface`, fully replacing its content.
    pub fn render_to(&self, surface: &mut dyn Surface, records: &[Record], query: &str) {
        surface.replace_content(&self.render(records, query));
    }

    fn empty_state(&self) -> &'static str {
        match self.spec.kind {
            EntityKind::Schedule => "No class schedules yet.",
            EntityKind::Task => "No tasks yet.",
            EntityKind::Note => "No notes yet.",
        }
    }

    fn format_item(&self, record: &Record) -> String {
        match self.spec.kind {
            EntityKind::Schedule => format_schedule(record),
            EntityKind::Task => format_task(record),
            EntityKind::Note => format_note(record),
        }
    }
}

fn format_schedule(record: &Record) -> String {
    let day = record.text(field::DAY);
    let time = record.text(field::TIME);
    let when = match (day.is_empty(), time.is_empty()) {
        (false, false) => format!("{day} {time}"),
        (false, true) => day.to_string(),
        (true, false) => time.to_string(),
        (true, true) => "unscheduled".to_string(),
    };
    format!(
        "[{when}] {} @ {}",
        record.text(field::SUBJECT),
        record.text(field::LOCATION)
    )
}

fn format_task(record: &Record) -> String {
    let mark = if record.flag(field::COMPLETED) {
        "[x]"
    } else {
        "[ ]"
    };
    let priority = Priority::parse_or_default(record.text(field::PRIORITY));
    let mut line = format!(
        "{mark} {} ({}) {}",
        record.text(field::TITLE),
        priority.label(),
        record.text(field::DESCRIPTION)
    );
    let deadline = record.text(field::DEADLINE);
    if !deadline.is_empty() {
        let _ = write!(line, " due {deadline}");
    }
    line
}

fn format_note(record: &Record) -> String {
    format!(
        "{} ({}): {}",
        record.text(field::TITLE),
        format_date(record.created_at),
        record.text(field::CONTENT)
    )
}

fn format_date(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|stamp| stamp.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::ListView;
    use crate::model::kind::{field, EntityKind};
    use crate::model::record::{FieldMap, Record};
    use crate::render::surface::{Surface, TextSurface};
    use uuid::Uuid;

    fn note(title: &str, content: &str) -> Record {
        // 2026-08-23 UTC.
        Record::with_id(
            Uuid::new_v4(),
            1_787_443_200_000,
            FieldMap::from([
                (field::TITLE.to_string(), title.into()),
                (field::CONTENT.to_string(), content.into()),
            ]),
        )
    }

    #[test]
    fn empty_result_renders_placeholder_not_blank_output() {
        let view = ListView::new(EntityKind::Note);
        assert_eq!(view.render(&[], ""), "No notes yet.");
        assert_eq!(view.render(&[note("a", "b")], "zzz"), "No notes yet.");
    }

    #[test]
    fn items_are_numbered_in_display_order() {
        let view = ListView::new(EntityKind::Note);
        let records = vec![note("First", "alpha"), note("Second", "beta")];
        let rendered = view.render(&records, "");
        assert!(rendered.starts_with("1. First"));
        assert!(rendered.contains("\n2. Second"));
        assert!(rendered.contains("2026-08-23"));
    }

    #[test]
    fn render_to_replaces_surface_content() {
        let view = ListView::new(EntityKind::Note);
        let mut surface = TextSurface::new();
        surface.replace_content("stale");
        view.render_to(&mut surface, &[], "");
        assert_eq!(surface.content(), "No notes yet.");
    }

    #[test]
    fn task_line_shows_completion_priority_and_deadline() {
        let view = ListView::new(EntityKind::Task);
        let record = Record::new(FieldMap::from([
            (field::TITLE.to_string(), "Essay".into()),
            (field::DESCRIPTION.to_string(), "Write essay".into()),
            (field::PRIORITY.to_string(), "high".into()),
            (field::DEADLINE.to_string(), "2026-09-01".into()),
            (field::COMPLETED.to_string(), false.into()),
        ]));
        let rendered = view.render(&[record], "");
        assert_eq!(rendered, "1. [ ] Essay (High) Write essay due 2026-09-01");
    }
}
