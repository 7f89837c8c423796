use crate::error::{CliError, CliResult};
use crate::prompt::{ask_line, confirm};
use notebox_core::{
    render_text, Clock, Event, ListView, Mode, NoteStore, NotesController, SortOrder, Update,
};
use std::io::{BufRead, Write};

const DELETE_QUESTION: &str = "Are you sure you want to delete this note?";

pub fn handle_add<S: NoteStore, C: Clock, W: Write>(
    controller: &mut NotesController<S, C>,
    title: String,
    body: String,
    out: &mut W,
) -> CliResult<()> {
    let update = controller.handle(Event::Submit { title, body })?;
    if let Some(alert) = update.alert {
        return Err(CliError::Alert(alert));
    }
    print_update(&update, out)
}

pub fn handle_list<S: NoteStore, C: Clock, W: Write>(
    controller: &mut NotesController<S, C>,
    search: String,
    sort: SortOrder,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    controller.handle(Event::SearchChanged(search))?;
    let view = controller
        .handle(Event::SortChanged(sort))?
        .view
        .unwrap_or_else(|| controller.render());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }
    print_view(&view, out)
}

/// Edits one note. Missing `title`/`body` are asked for interactively;
/// an empty answer keeps the field, `-` clears it, and closing input at
/// either prompt abandons the edit.
pub fn handle_edit<S: NoteStore, C: Clock, R: BufRead, W: Write>(
    controller: &mut NotesController<S, C>,
    reference: &str,
    title: Option<String>,
    body: Option<String>,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let id = controller.service().resolve(reference)?;
    let update = controller.handle(Event::BeginEdit(id))?;
    let Mode::Editing(draft) = controller.mode().clone() else {
        // Note vanished between resolve and edit.
        return print_update(&update, out);
    };

    let title = match title {
        Some(title) => Some(title),
        None => ask_line(input, out, "Edit title", &draft.title)?,
    };
    let Some(title) = title else {
        controller.handle(Event::CancelEdit)?;
        writeln!(out, "Edit cancelled.")?;
        return Ok(());
    };

    let body = match body {
        Some(body) => Some(body),
        None => ask_line(input, out, "Edit content", &draft.body)?,
    };
    let Some(body) = body else {
        controller.handle(Event::CancelEdit)?;
        writeln!(out, "Edit cancelled.")?;
        return Ok(());
    };

    let update = controller.handle(Event::ConfirmEdit { title, body })?;
    print_update(&update, out)
}

pub fn handle_delete<S: NoteStore, C: Clock, R: BufRead, W: Write>(
    controller: &mut NotesController<S, C>,
    reference: &str,
    yes: bool,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let id = controller.service().resolve(reference)?;
    controller.handle(Event::RequestDelete(id))?;

    if !yes && !confirm(input, out, DELETE_QUESTION)? {
        controller.handle(Event::CancelDelete)?;
        writeln!(out, "Delete cancelled.")?;
        return Ok(());
    }

    let update = controller.handle(Event::ConfirmDelete)?;
    print_update(&update, out)
}

fn print_update<W: Write>(update: &Update, out: &mut W) -> CliResult<()> {
    match &update.view {
        Some(view) => print_view(view, out),
        None => Ok(()),
    }
}

fn print_view<W: Write>(view: &ListView, out: &mut W) -> CliResult<()> {
    write!(out, "{}", render_text(view))?;
    Ok(())
}
