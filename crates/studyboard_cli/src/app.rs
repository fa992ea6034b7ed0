//! Interactive dashboard session.
//!
//! # Responsibility
//! - Parse line commands and drive the three entity stores, the modal form
//!   controller and the per-panel renderers.
//! - Keep panel surfaces and the statistics line fresh after every mutation.
//!
//! # Invariants
//! - List numbers printed to the user always map back to record ids through
//!   the panel's last rendered visible set.
//! - Deletion requires an explicit confirmation; declining leaves the
//!   persisted data untouched.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use studyboard_core::rusqlite::Connection;
use studyboard_core::{
    core_version, field, EntityKind, EntityStore, ListView, ModalController, RecordId,
    SearchDebouncer, SqliteKvStore, StatsSnapshot, StorageResult, TextSurface,
    DEFAULT_DEBOUNCE_WINDOW,
};

use crate::widget::{clock_line, weather_line, SimulatedWeather};

const HELP_TEXT: &str = "\
commands:
  list <kind>              show one panel (kind: schedule | task | note)
  search <kind> <text>     filter a panel, case-insensitive substring
  clear <kind>             drop a panel's filter
  add <kind>               open a create form
  edit <kind> <n>          open an edit form for list item n
  del <kind> <n>           delete list item n (asks for confirmation)
  done <n>                 toggle completion of task n
  stats                    show the counters line
  help                     show this text
  quit                     leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Stats,
    List(EntityKind),
    Search(EntityKind, String),
    Clear(EntityKind),
    Add(EntityKind),
    Edit(EntityKind, usize),
    Delete(EntityKind, usize),
    Done(usize),
}

/// Parses one non-empty input line into a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();

    let command = match verb {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "stats" => Command::Stats,
        "list" | "ls" => Command::List(parse_kind(words.next())?),
        "search" => {
            let kind = parse_kind(words.next())?;
            let query = words.by_ref().collect::<Vec<_>>().join(" ");
            Command::Search(kind, query)
        }
        "clear" => Command::Clear(parse_kind(words.next())?),
        "add" => Command::Add(parse_kind(words.next())?),
        "edit" => Command::Edit(parse_kind(words.next())?, parse_position(words.next())?),
        "del" | "delete" | "rm" => {
            Command::Delete(parse_kind(words.next())?, parse_position(words.next())?)
        }
        "done" => Command::Done(parse_position(words.next())?),
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(command)
}

fn parse_kind(word: Option<&str>) -> Result<EntityKind, String> {
    match word {
        Some("schedule") | Some("schedules") => Ok(EntityKind::Schedule),
        Some("task") | Some("tasks") => Ok(EntityKind::Task),
        Some("note") | Some("notes") => Ok(EntityKind::Note),
        Some(other) => Err(format!(
            "unknown kind `{other}`, expected schedule | task | note"
        )),
        None => Err("missing kind, expected schedule | task | note".to_string()),
    }
}

fn parse_position(word: Option<&str>) -> Result<usize, String> {
    let word = word.ok_or_else(|| "missing list number".to_string())?;
    match word.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(format!("`{word}` is not a valid list number")),
    }
}

/// One entity kind's panel: store, renderer, filter state and surface.
struct Panel<'conn> {
    store: EntityStore<SqliteKvStore<'conn>>,
    view: ListView,
    surface: TextSurface,
    query: String,
    debouncer: SearchDebouncer,
    /// Record ids behind the last rendered list numbers, in display order.
    visible: Vec<RecordId>,
}

impl<'conn> Panel<'conn> {
    fn open(conn: &'conn Connection, kind: EntityKind) -> StorageResult<Self> {
        Ok(Self {
            store: EntityStore::open(SqliteKvStore::try_new(conn)?, kind.spec()),
            view: ListView::new(kind),
            surface: TextSurface::new(),
            query: String::new(),
            debouncer: SearchDebouncer::default(),
            visible: Vec::new(),
        })
    }

    fn rerender(&mut self) {
        let records = self.store.all();
        self.visible = self
            .view
            .visible(&records, &self.query)
            .iter()
            .map(|record| record.id)
            .collect();
        self.view.render_to(&mut self.surface, &records, &self.query);
    }

    fn resolve(&self, position: usize) -> Option<RecordId> {
        position
            .checked_sub(1)
            .and_then(|index| self.visible.get(index).copied())
    }
}

/// The interactive session over one open store connection.
pub struct App<'conn> {
    schedules: Panel<'conn>,
    tasks: Panel<'conn>,
    notes: Panel<'conn>,
    modal: ModalController,
    stats: TextSurface,
}

impl<'conn> App<'conn> {
    pub fn new(conn: &'conn Connection) -> StorageResult<Self> {
        let mut app = Self {
            schedules: Panel::open(conn, EntityKind::Schedule)?,
            tasks: Panel::open(conn, EntityKind::Task)?,
            notes: Panel::open(conn, EntityKind::Note)?,
            modal: ModalController::new(),
            stats: TextSurface::new(),
        };
        app.rerender_all();
        app.refresh_stats();
        Ok(app)
    }

    /// Runs the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "StudyBoard {} | {} | {}",
            core_version(),
            clock_line(),
            weather_line(&mut SimulatedWeather)
        )?;
        self.print_dashboard(out)?;

        loop {
            self.poll_searches(out)?;

            write!(out, "studyboard> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Err(message) => writeln!(out, "{message}")?,
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command, input, out)?,
            }
        }
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        match command {
            Command::Help => writeln!(out, "{HELP_TEXT}"),
            Command::Quit => Ok(()),
            Command::Stats => {
                self.refresh_stats();
                self.print_stats(out)
            }
            Command::List(kind) => {
                self.panel_mut(kind).rerender();
                self.print_panel(kind, out)
            }
            Command::Search(kind, query) => {
                self.panel_mut(kind)
                    .debouncer
                    .schedule(query, Instant::now());
                // Honor the quiet period, then let the pending query fire.
                thread::sleep(DEFAULT_DEBOUNCE_WINDOW);
                self.poll_searches(out)
            }
            Command::Clear(kind) => {
                let panel = self.panel_mut(kind);
                panel.debouncer.cancel();
                panel.query.clear();
                panel.rerender();
                self.print_panel(kind, out)
            }
            Command::Add(kind) => self.run_form(kind, None, input, out),
            Command::Edit(kind, position) => {
                match self.panel(kind).resolve(position) {
                    Some(id) => self.run_form(kind, Some(id), input, out),
                    None => writeln!(out, "no {} at position {position}", kind.label()),
                }
            }
            Command::Delete(kind, position) => self.delete_flow(kind, position, input, out),
            Command::Done(position) => self.toggle_flow(position, out),
        }
    }

    fn poll_searches<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let now = Instant::now();
        for kind in [EntityKind::Schedule, EntityKind::Task, EntityKind::Note] {
            let panel = self.panel_mut(kind);
            if let Some(query) = panel.debouncer.poll(now) {
                panel.query = query;
                panel.rerender();
                self.print_panel(kind, out)?;
            }
        }
        Ok(())
    }

    fn run_form<R: BufRead, W: Write>(
        &mut self,
        kind: EntityKind,
        target: Option<RecordId>,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let form = match target {
            None => self.modal.open_create(kind).clone(),
            Some(id) => {
                let Some(record) = self.panel(kind).store.get(id).cloned() else {
                    writeln!(out, "that {} no longer exists", kind.label())?;
                    return Ok(());
                };
                self.modal.open_edit(kind, &record).clone()
            }
        };

        writeln!(
            out,
            "{} {} (enter keeps the shown value, `.` cancels)",
            if target.is_some() { "edit" } else { "new" },
            kind.label()
        )?;

        let mut values = form.values;
        loop {
            for name in kind.spec().form_fields {
                let seed = values
                    .get(*name)
                    .and_then(|value| value.as_text())
                    .unwrap_or("")
                    .to_string();
                write!(out, "  {name} [{seed}]: ")?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    self.modal.cancel();
                    return Ok(());
                }
                let entry = line.trim();
                if entry == "." {
                    self.modal.cancel();
                    writeln!(out, "cancelled")?;
                    return Ok(());
                }
                if !entry.is_empty() {
                    values.insert((*name).to_string(), entry.into());
                }
            }

            match self.modal.submit(values.clone()) {
                Ok(submission) => {
                    let result = {
                        let panel = self.panel_mut(submission.kind);
                        match submission.target {
                            None => panel.store.add(submission.values),
                            Some(id) => panel.store.update(id, submission.values),
                        }
                    };
                    match result {
                        Ok(_) => self.after_mutation(kind, out)?,
                        Err(err) => writeln!(out, "error: {err}")?,
                    }
                    return Ok(());
                }
                // Validation failed; the form is still open, prompt again.
                Err(err) => writeln!(out, "  {err}")?,
            }
        }
    }

    fn delete_flow<R: BufRead, W: Write>(
        &mut self,
        kind: EntityKind,
        position: usize,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(id) = self.panel(kind).resolve(position) else {
            return writeln!(out, "no {} at position {position}", kind.label());
        };

        write!(out, "delete {} {position}? [y/N]: ", kind.label())?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        if !matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            return writeln!(out, "kept");
        }

        match self.panel_mut(kind).store.delete(id) {
            Ok(()) => self.after_mutation(kind, out),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn toggle_flow<W: Write>(&mut self, position: usize, out: &mut W) -> io::Result<()> {
        let Some(id) = self.tasks.resolve(position) else {
            return writeln!(out, "no task at position {position}");
        };

        match self.tasks.store.toggle_flag(id, field::COMPLETED) {
            Ok(_) => self.after_mutation(EntityKind::Task, out),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn after_mutation<W: Write>(&mut self, kind: EntityKind, out: &mut W) -> io::Result<()> {
        self.panel_mut(kind).rerender();
        self.refresh_stats();
        self.print_panel(kind, out)?;
        self.print_stats(out)
    }

    fn refresh_stats(&mut self) {
        StatsSnapshot::collect(&self.schedules.store, &self.tasks.store, &self.notes.store)
            .publish(&mut self.stats);
    }

    fn rerender_all(&mut self) {
        self.schedules.rerender();
        self.tasks.rerender();
        self.notes.rerender();
    }

    fn print_dashboard<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for kind in [EntityKind::Schedule, EntityKind::Task, EntityKind::Note] {
            self.print_panel(kind, out)?;
        }
        self.print_stats(out)
    }

    fn print_panel<W: Write>(&self, kind: EntityKind, out: &mut W) -> io::Result<()> {
        let panel = self.panel(kind);
        writeln!(out, "== {}s ==", kind.label())?;
        if !panel.query.is_empty() {
            writeln!(out, "(filter: {})", panel.query)?;
        }
        writeln!(out, "{}", panel.surface.content())
    }

    fn print_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.stats.content())
    }

    fn panel(&self, kind: EntityKind) -> &Panel<'conn> {
        match kind {
            EntityKind::Schedule => &self.schedules,
            EntityKind::Task => &self.tasks,
            EntityKind::Note => &self.notes,
        }
    }

    fn panel_mut(&mut self, kind: EntityKind) -> &mut Panel<'conn> {
        match kind {
            EntityKind::Schedule => &mut self.schedules,
            EntityKind::Task => &mut self.tasks,
            EntityKind::Note => &mut self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, App, Command};
    use std::io::Cursor;
    use studyboard_core::{open_store_in_memory, EntityKind};

    fn run_session(script: &str) -> String {
        let conn = open_store_in_memory().unwrap();
        let mut app = App::new(&conn).unwrap();
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        app.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_the_core_command_forms() {
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("list tasks"), Ok(Command::List(EntityKind::Task)));
        assert_eq!(
            parse_command("search schedule kalkulus pagi"),
            Ok(Command::Search(
                EntityKind::Schedule,
                "kalkulus pagi".to_string()
            ))
        );
        assert_eq!(
            parse_command("del note 2"),
            Ok(Command::Delete(EntityKind::Note, 2))
        );
        assert_eq!(parse_command("done 1"), Ok(Command::Done(1)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("list everything").is_err());
        assert!(parse_command("edit task zero").is_err());
        assert!(parse_command("del task 0").is_err());
        assert!(parse_command("stats now").is_err());
    }

    #[test]
    fn add_note_flow_renders_the_note_and_updates_stats() {
        let output = run_session("add note\nIdeas\nremember this\nstats\nquit\n");
        assert!(output.contains("1. Ideas"));
        assert!(output.contains("notes: 1"));
    }

    #[test]
    fn failed_validation_reprompts_until_the_form_is_complete() {
        // First pass leaves content empty; the second pass fills it in.
        let output = run_session("add note\nIdeas\n\n\ncontent at last\nquit\n");
        assert!(output.contains("must not be empty"));
        assert!(output.contains("1. Ideas"));
    }

    #[test]
    fn declined_delete_keeps_the_record() {
        let output = run_session("add note\nIdeas\nkeep me\ndel note 1\nn\nlist note\nquit\n");
        assert!(output.contains("kept"));
        assert!(output.matches("1. Ideas").count() >= 2);
    }

    #[test]
    fn done_toggles_task_completion() {
        let output = run_session("add task\nEssay\nwrite essay\n\n\ndone 1\nquit\n");
        assert!(output.contains("[ ] Essay"));
        assert!(output.contains("[x] Essay"));
        assert!(output.contains("tasks: 1 (1 completed)"));
    }

    #[test]
    fn search_filters_a_panel_after_the_quiet_period() {
        let output = run_session(
            "add note\nKalkulus\nlimit bab 2\nadd note\nFisika\ngerak lurus\nsearch note kalkulus\nquit\n",
        );
        assert!(output.contains("(filter: kalkulus)"));
        let filtered = output.rsplit("(filter: kalkulus)").next().unwrap();
        assert!(filtered.contains("1. Kalkulus"));
        assert!(!filtered.contains("Fisika ("));
    }

    #[test]
    fn dot_cancels_a_form_without_saving() {
        let output = run_session("add note\n.\nstats\nquit\n");
        assert!(output.contains("cancelled"));
        assert!(output.contains("notes: 0"));
    }
}
