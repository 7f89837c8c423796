//! Interaction controller for the note list surface.
//!
//! # Responsibility
//! - Translate UI events into note service calls and list re-renders.
//! - Own the transient UI state: search text, sort order and edit/delete mode.
//!
//! # Invariants
//! - Every handled event that changes data or query ends in a full
//!   reload-filter-sort-render cycle.
//! - Blank submissions never reach the service.
//! - Edit and delete require an explicit confirm event; cancel changes nothing.
//! - Events that do not fit the current mode are rejected without side effects.

use crate::model::note::NoteId;
use crate::query::engine::{apply, SortOrder};
use crate::repo::note_store::NoteStore;
use crate::service::clock::{Clock, SystemClock};
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::view::list::{render_list, ListView};
use chrono::{FixedOffset, Local};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Alert shown when a submission has neither title nor body.
pub const EMPTY_SUBMIT_ALERT: &str = "Please enter a title or some content for your note.";

/// UI events accepted by [`NotesController::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Startup,
    Submit { title: String, body: String },
    SearchChanged(String),
    SortChanged(SortOrder),
    BeginEdit(NoteId),
    ConfirmEdit { title: String, body: String },
    CancelEdit,
    RequestDelete(NoteId),
    ConfirmDelete,
    CancelDelete,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Submit { .. } => "submit",
            Self::SearchChanged(_) => "search_changed",
            Self::SortChanged(_) => "sort_changed",
            Self::BeginEdit(_) => "begin_edit",
            Self::ConfirmEdit { .. } => "confirm_edit",
            Self::CancelEdit => "cancel_edit",
            Self::RequestDelete(_) => "request_delete",
            Self::ConfirmDelete => "confirm_delete",
            Self::CancelDelete => "cancel_delete",
        }
    }
}

/// Values the UI pre-fills while a note is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: NoteId,
    pub title: String,
    pub body: String,
}

/// Interaction mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Editing(EditDraft),
    ConfirmingDelete { id: NoteId },
}

impl Mode {
    fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Editing(_) => "editing",
            Self::ConfirmingDelete { .. } => "confirming_delete",
        }
    }
}

/// What the UI should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Update {
    /// Replacement list contents, when the list was re-rendered.
    pub view: Option<ListView>,
    /// Blocking message for the user.
    pub alert: Option<String>,
    /// Clear the title/body form fields.
    pub clear_form: bool,
    /// Move focus to the title field.
    pub focus_title: bool,
}

/// Controller error.
#[derive(Debug)]
pub enum ControllerError {
    Service(NoteServiceError),
    UnexpectedEvent {
        event: &'static str,
        mode: &'static str,
    },
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::UnexpectedEvent { event, mode } => {
                write!(f, "event `{event}` is not valid while {mode}")
            }
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::UnexpectedEvent { .. } => None,
        }
    }
}

impl From<NoteServiceError> for ControllerError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

/// Event-driven controller holding search/sort state and the edit mode.
pub struct NotesController<S: NoteStore, C: Clock = SystemClock> {
    service: NoteService<S, C>,
    query: String,
    sort: SortOrder,
    mode: Mode,
    display_offset: Option<FixedOffset>,
}

impl<S: NoteStore, C: Clock> NotesController<S, C> {
    /// Creates a controller rendering timestamps in the local timezone.
    pub fn new(service: NoteService<S, C>) -> Self {
        Self {
            service,
            query: String::new(),
            sort: SortOrder::default(),
            mode: Mode::Browsing,
            display_offset: None,
        }
    }

    /// Renders timestamps in a fixed offset instead of the local timezone.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = Some(offset);
        self
    }

    pub fn service(&self) -> &NoteService<S, C> {
        &self.service
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Handles one event to completion.
    pub fn handle(&mut self, event: Event) -> Result<Update, ControllerError> {
        debug!(
            "event=ui_event module=controller name={} mode={}",
            event.name(),
            self.mode.name()
        );

        match event {
            Event::Startup => {
                self.query.clear();
                self.sort = SortOrder::default();
                self.mode = Mode::Browsing;
                Ok(Update {
                    view: Some(self.render()),
                    focus_title: true,
                    ..Update::default()
                })
            }
            Event::SearchChanged(query) => {
                self.query = query;
                Ok(self.rendered())
            }
            Event::SortChanged(sort) => {
                self.sort = sort;
                Ok(self.rendered())
            }
            Event::Submit { title, body } => {
                self.expect_browsing("submit")?;
                self.submit(title, body)
            }
            Event::BeginEdit(id) => {
                self.expect_browsing("begin_edit")?;
                self.begin_edit(id)
            }
            Event::ConfirmEdit { title, body } => {
                let Mode::Editing(draft) = &self.mode else {
                    return Err(self.unexpected("confirm_edit"));
                };
                let id = draft.id;
                self.service.update(id, title.trim(), body.trim())?;
                self.mode = Mode::Browsing;
                Ok(self.rendered())
            }
            Event::CancelEdit => {
                if !matches!(self.mode, Mode::Editing(_)) {
                    return Err(self.unexpected("cancel_edit"));
                }
                self.mode = Mode::Browsing;
                Ok(Update::default())
            }
            Event::RequestDelete(id) => {
                self.expect_browsing("request_delete")?;
                self.mode = Mode::ConfirmingDelete { id };
                Ok(Update::default())
            }
            Event::ConfirmDelete => {
                let Mode::ConfirmingDelete { id } = self.mode else {
                    return Err(self.unexpected("confirm_delete"));
                };
                self.service.remove(id)?;
                self.mode = Mode::Browsing;
                Ok(self.rendered())
            }
            Event::CancelDelete => {
                if !matches!(self.mode, Mode::ConfirmingDelete { .. }) {
                    return Err(self.unexpected("cancel_delete"));
                }
                self.mode = Mode::Browsing;
                Ok(Update::default())
            }
        }
    }

    /// Runs the load-filter-sort-render cycle with the current query and sort.
    pub fn render(&self) -> ListView {
        let notes = apply(&self.service.list(), &self.query, self.sort);
        let now = self.service.now();
        match self.display_offset {
            Some(offset) => render_list(&notes, &self.query, &now.with_timezone(&offset)),
            None => render_list(&notes, &self.query, &now.with_timezone(&Local)),
        }
    }

    fn submit(&mut self, title: String, body: String) -> Result<Update, ControllerError> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() && body.is_empty() {
            return Ok(Update {
                alert: Some(EMPTY_SUBMIT_ALERT.to_string()),
                ..Update::default()
            });
        }

        self.service.create(title, body)?;
        Ok(Update {
            view: Some(self.render()),
            clear_form: true,
            focus_title: true,
            ..Update::default()
        })
    }

    fn begin_edit(&mut self, id: NoteId) -> Result<Update, ControllerError> {
        match self.service.get(id) {
            Some(note) => {
                self.mode = Mode::Editing(EditDraft {
                    id,
                    title: note.title,
                    body: note.body,
                });
                Ok(Update::default())
            }
            // Removed elsewhere since the last render.
            None => Ok(self.rendered()),
        }
    }

    fn rendered(&self) -> Update {
        Update {
            view: Some(self.render()),
            ..Update::default()
        }
    }

    fn expect_browsing(&self, event: &'static str) -> Result<(), ControllerError> {
        if self.mode == Mode::Browsing {
            Ok(())
        } else {
            Err(self.unexpected(event))
        }
    }

    fn unexpected(&self, event: &'static str) -> ControllerError {
        ControllerError::UnexpectedEvent {
            event,
            mode: self.mode.name(),
        }
    }
}
