//! Client-side session: the cached collection plus the single edit form.
//!
//! The record store stays the only source of truth. After every successful
//! mutation the whole collection is fetched again instead of patching the
//! cache locally.

mod filter;

pub use filter::*;

use crate::api::StudentApi;
use crate::errors::ClientError;
use crate::models::{Student, StudentInput};

/// Which record, if any, the form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The form drafts a new record.
    #[default]
    New,
    /// The form edits the record with this id.
    Editing(i64),
}

/// Unsaved field values of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub email: String,
}

impl Draft {
    /// Turn the draft into a request body, rejecting blank fields.
    pub fn to_input(&self) -> Result<StudentInput, ClientError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation("Name is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ClientError::Validation("Email is required".to_string()));
        }

        Ok(StudentInput {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Message for the user about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Confirmation asked before a record is deleted.
pub trait Confirm {
    fn confirm(&self, student: &Student) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&Student) -> bool,
{
    fn confirm(&self, student: &Student) -> bool {
        self(student)
    }
}

/// State of one client instance.
pub struct Session<A> {
    api: A,
    students: Vec<Student>,
    mode: Mode,
    draft: Draft,
    search: String,
    notice: Option<Notice>,
}

impl<A: StudentApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            students: Vec::new(),
            mode: Mode::New,
            draft: Draft::default(),
            search: String::new(),
            notice: None,
        }
    }

    /// Cached collection as last fetched.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Rows left after applying the search text.
    pub fn visible(&self) -> Vec<&Student> {
        quick_filter(&self.students, &self.search)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search text. Only narrows what is displayed.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Replace the cache with the server's collection.
    ///
    /// On failure the previous cache is kept and an error notice is recorded.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(students) => {
                tracing::debug!(count = students.len(), "Fetched students");
                self.students = students;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error fetching students: {}", e);
                self.notice = Some(Notice::Error(format!("Could not load students: {}", e)));
                Err(e)
            }
        }
    }

    /// Load a cached record into the form for editing.
    pub fn begin_edit(&mut self, id: i64) -> Result<(), ClientError> {
        let student = self.cached(id)?;

        self.draft = Draft {
            name: student.name,
            email: student.email,
        };
        self.mode = Mode::Editing(id);
        Ok(())
    }

    /// Leave edit mode and clear the form.
    pub fn cancel(&mut self) {
        self.reset_form();
    }

    /// Create or update depending on the mode.
    ///
    /// On failure mode and draft are left as they were so nothing typed is lost.
    pub async fn submit(&mut self) -> Result<Student, ClientError> {
        let input = match self.draft.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                return Err(e);
            }
        };

        let result = match self.mode {
            Mode::New => self.api.create(&input).await,
            Mode::Editing(id) => self.api.update(id, &input).await,
        };

        match result {
            Ok(student) => {
                let verb = match self.mode {
                    Mode::New => "added",
                    Mode::Editing(_) => "updated",
                };
                tracing::info!(id = student.id, "Student {}", verb);
                self.reset_form();
                self.notice = Some(Notice::Info(format!("Student {}", verb)));
                // A failed resync is reported through the notice; the save itself succeeded
                let _ = self.refresh().await;
                Ok(student)
            }
            Err(e) => {
                tracing::warn!("Error saving student: {}", e);
                self.notice = Some(Notice::Error(match &e {
                    ClientError::NotFound(_) => "Student no longer exists".to_string(),
                    other => other.to_string(),
                }));
                Err(e)
            }
        }
    }

    /// Delete a cached record once `confirm` agrees.
    ///
    /// Returns `Ok(false)` when the user declined; no request is sent then.
    pub async fn delete(&mut self, id: i64, confirm: &impl Confirm) -> Result<bool, ClientError> {
        let student = self.cached(id)?;

        if !confirm.confirm(&student) {
            return Ok(false);
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Student deleted");
                if self.mode == Mode::Editing(id) {
                    self.reset_form();
                }
                self.notice = Some(Notice::Info("Student deleted".to_string()));
                let _ = self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Error deleting student: {}", e);
                self.notice = Some(Notice::Error(match &e {
                    ClientError::NotFound(_) => "Student no longer exists".to_string(),
                    other => other.to_string(),
                }));
                Err(e)
            }
        }
    }

    /// Copy of a cached record; an unknown id is reported through the notice.
    fn cached(&mut self, id: i64) -> Result<Student, ClientError> {
        match self.students.iter().find(|s| s.id == id) {
            Some(student) => Ok(student.clone()),
            None => {
                let e = ClientError::NotFound(format!("Student {} not found", id));
                self.notice = Some(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }

    fn reset_form(&mut self) {
        self.mode = Mode::New;
        self.draft = Draft::default();
    }
}
