//! Editor modal controller.

use std::sync::Arc;

use crate::backend::{RecordApi, TagOptions};
use crate::errors::AppError;
use crate::form::{validate_submission_payload, FormState, FormView, TagSelect};
use crate::models::{Entry, Mode, Question, QuestionnaireShort, RecordKind, Status};

use super::{ModalState, SubmitOutcome, Ticket, SPARE_ROWS};

/// A record fetched for display in the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Question(Question),
    Questionnaire(QuestionnaireShort),
}

impl Record {
    fn kind(&self) -> RecordKind {
        match self {
            Record::Question(_) => RecordKind::Question,
            Record::Questionnaire(_) => RecordKind::Questionnaire,
        }
    }
}

/// Drives one editor modal: open, mutate, reset, submit, close.
pub struct ModalController {
    kind: RecordKind,
    api: Arc<dyn RecordApi>,
    state: ModalState,
    form: FormState,
    subjects: TagSelect,
    uses: TagSelect,
    known: TagOptions,
    /// Record the modal was opened on, used by reset in edit mode.
    original: Option<Record>,
    view: FormView,
}

impl ModalController {
    pub fn new(kind: RecordKind, api: Arc<dyn RecordApi>) -> Self {
        let mut form = FormState::new(kind);
        let view = form.recompute();
        Self {
            kind,
            api,
            state: ModalState::Closed,
            form,
            subjects: TagSelect::new(),
            uses: TagSelect::new(),
            known: TagOptions::default(),
            original: None,
            view,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn subject_select(&self) -> &TagSelect {
        &self.subjects
    }

    pub fn use_select(&self) -> &TagSelect {
        &self.uses
    }

    /// Fill both tag selects with the backend's known values.
    pub async fn load_tag_options(&mut self) {
        let options = self.api.load_tag_options().await;
        tracing::debug!(
            subjects = options.subjects.len(),
            uses = options.uses.len(),
            "Tag options loaded"
        );
        self.subjects.fill_options(&options.subjects);
        self.uses.fill_options(&options.uses);
        self.known = options;
    }

    /// Open a blank form: two empty rows, draft status.
    pub fn open_create(&mut self) -> FormView {
        self.original = None;
        self.blank_form();
        self.state = ModalState::Open {
            mode: Mode::Create,
            id: None,
        };
        tracing::info!(kind = self.kind.as_str(), "Modal opened for creation");
        self.recompute()
    }

    /// Enter the loading state for `id`. The returned ticket must be handed
    /// back to [`complete_open`](Self::complete_open) with the fetch result.
    pub fn begin_open(&mut self, mode: Mode, id: &str) -> Result<Ticket, AppError> {
        if mode == Mode::Create {
            return Err(AppError::BadRequest(
                "Create mode does not load a record".to_string(),
            ));
        }
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("Missing record id".to_string()));
        }

        let ticket = Ticket::issue();
        self.state = ModalState::Loading {
            mode,
            id: id.to_string(),
            ticket,
        };
        tracing::debug!(mode = mode.as_str(), id, %ticket, "Loading record");
        Ok(ticket)
    }

    /// Finish a fetch started by [`begin_open`](Self::begin_open).
    ///
    /// Returns `Ok(None)` when the ticket is stale: the modal was closed or
    /// reopened meanwhile and the result is dropped. A failed fetch closes the
    /// modal and returns the error.
    pub fn complete_open(
        &mut self,
        ticket: Ticket,
        result: Result<Record, AppError>,
    ) -> Result<Option<FormView>, AppError> {
        let (mode, id) = match &self.state {
            ModalState::Loading {
                mode,
                id,
                ticket: current,
            } if *current == ticket => (*mode, id.clone()),
            _ => {
                tracing::debug!(%ticket, "Dropping stale fetch result");
                return Ok(None);
            }
        };

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to load {} {}: {}", self.kind.as_str(), id, e);
                self.close();
                return Err(e);
            }
        };

        if record.kind() != self.kind {
            self.close();
            return Err(AppError::Internal(format!(
                "Expected a {} record",
                self.kind.as_str()
            )));
        }

        self.populate(&record, mode);
        self.original = Some(record);
        self.state = ModalState::Open { mode, id: Some(id) };
        tracing::info!(kind = self.kind.as_str(), mode = mode.as_str(), "Modal opened");
        Ok(Some(self.recompute()))
    }

    /// Fetch `id` and open it in `mode`.
    pub async fn open(&mut self, mode: Mode, id: &str) -> Result<Option<FormView>, AppError> {
        let ticket = self.begin_open(mode, id)?;
        let id = id.trim();
        let result = match self.kind {
            RecordKind::Question => self.api.fetch_question(id).await.map(Record::Question),
            RecordKind::Questionnaire => self
                .api
                .fetch_questionnaire(id)
                .await
                .map(Record::Questionnaire),
        };
        self.complete_open(ticket, result)
    }

    pub async fn open_edit(&mut self, id: &str) -> Result<Option<FormView>, AppError> {
        self.open(Mode::Edit, id).await
    }

    pub async fn open_view(&mut self, id: &str) -> Result<Option<FormView>, AppError> {
        self.open(Mode::View, id).await
    }

    /// Close the modal. Any pending fetch becomes stale.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.original = None;
        self.blank_form();
        self.recompute();
    }

    /// Restore the form: blank in create mode, the fetched record in edit mode.
    pub fn reset(&mut self) -> Result<FormView, AppError> {
        let mode = self.editable_mode()?;
        match (mode, self.original.clone()) {
            (Mode::Edit, Some(record)) => self.populate(&record, Mode::Edit),
            _ => self.blank_form(),
        }
        tracing::debug!(kind = self.kind.as_str(), "Form reset");
        Ok(self.recompute())
    }

    pub fn set_title(&mut self, title: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        self.form.title = title.to_string();
        Ok(self.recompute())
    }

    pub fn set_remark(&mut self, remark: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        self.form.remark = Some(remark.to_string());
        Ok(self.recompute())
    }

    pub fn toggle_subject(&mut self, value: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.subjects.toggle(value) {
            return Err(AppError::BadRequest(format!("Unknown subject: {}", value)));
        }
        Ok(self.recompute())
    }

    pub fn toggle_use(&mut self, value: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.uses.toggle(value) {
            return Err(AppError::BadRequest(format!("Unknown use: {}", value)));
        }
        Ok(self.recompute())
    }

    /// Add a new subject and make it the only selected one.
    pub fn add_subject(&mut self, value: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.subjects.add_if_missing(value) {
            return Err(AppError::invalid("Please enter a subject."));
        }
        Ok(self.recompute())
    }

    /// Add a new use and make it the only selected one.
    pub fn add_use(&mut self, value: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.uses.add_if_missing(value) {
            return Err(AppError::invalid("Please enter a use."));
        }
        Ok(self.recompute())
    }

    /// Select a lifecycle status. Gated statuses are refused while disabled.
    pub fn select_status(&mut self, status: Status) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.view.statuses.allows(status) {
            return Err(AppError::invalid(match self.kind {
                RecordKind::Question => {
                    "A correct response is required for the active or archived status."
                }
                RecordKind::Questionnaire => {
                    "Complete the questionnaire before activating or archiving it."
                }
            }));
        }
        self.form.status = status;
        Ok(self.recompute())
    }

    /// Append a blank row, returning its index with the new view.
    pub fn add_entry(&mut self) -> Result<(usize, FormView), AppError> {
        self.editable_mode()?;
        let index = self.form.entries.add("", false);
        Ok((index, self.recompute()))
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<FormView, AppError> {
        self.editable_mode()?;
        self.form.entries.remove(index).ok_or_else(|| no_entry(index))?;
        Ok(self.recompute())
    }

    pub fn set_entry_text(&mut self, index: usize, text: &str) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.form.entries.set_text(index, text) {
            return Err(no_entry(index));
        }
        Ok(self.recompute())
    }

    pub fn toggle_correct(&mut self, index: usize) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.kind.has_correctness() {
            return Err(AppError::BadRequest(
                "Questionnaire entries have no correct flag".to_string(),
            ));
        }
        self.form
            .entries
            .toggle_correct(index)
            .ok_or_else(|| no_entry(index))?;
        Ok(self.recompute())
    }

    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<FormView, AppError> {
        self.editable_mode()?;
        if !self.form.entries.move_entry(from, to) {
            return Err(no_entry(from.max(to)));
        }
        Ok(self.recompute())
    }

    /// Validate the payload, then create or update the record.
    ///
    /// Local validation failures never reach the network. On success the
    /// modal is closed.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        let mode = self.editable_mode()?;
        self.recompute();

        let payload = self.form.to_payload();
        let errors = validate_submission_payload(&payload);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Submission refused by validation");
            return Err(AppError::Validation(errors));
        }

        let status = payload.status;
        let record_id = self.state.record_id().map(str::to_string);
        let noun = match self.kind {
            RecordKind::Question => "Question",
            RecordKind::Questionnaire => "Questionnaire",
        };

        let outcome = match (mode, record_id) {
            (Mode::Edit, Some(id)) => {
                match self.kind {
                    RecordKind::Question => {
                        self.api
                            .update_question(&id, &payload.into_question_payload())
                            .await?;
                    }
                    RecordKind::Questionnaire => {
                        self.api
                            .update_questionnaire(&id, &payload.into_questionnaire_payload())
                            .await?;
                    }
                }
                SubmitOutcome {
                    id,
                    status,
                    created: false,
                    message: format!("{} updated successfully.", noun),
                }
            }
            _ => {
                let id = match self.kind {
                    RecordKind::Question => {
                        self.api
                            .create_question(&payload.into_question_payload())
                            .await?
                    }
                    RecordKind::Questionnaire => {
                        self.api
                            .create_questionnaire(&payload.into_questionnaire_payload())
                            .await?
                    }
                };
                SubmitOutcome {
                    id,
                    status,
                    created: true,
                    message: format!(
                        "{} created successfully{}.",
                        noun,
                        status.creation_phrase()
                    ),
                }
            }
        };

        tracing::info!(
            kind = self.kind.as_str(),
            id = %outcome.id,
            created = outcome.created,
            "Record saved"
        );
        self.close();
        Ok(outcome)
    }

    /// Mode of an open, writable modal.
    fn editable_mode(&self) -> Result<Mode, AppError> {
        match &self.state {
            ModalState::Open { mode, .. } if !mode.is_readonly() => Ok(*mode),
            _ => Err(AppError::Locked),
        }
    }

    fn blank_form(&mut self) {
        self.form = FormState::new(self.kind);
        self.rebuild_selects();
    }

    /// Known tags, none selected.
    fn rebuild_selects(&mut self) {
        self.subjects = TagSelect::new();
        self.subjects.fill_options(&self.known.subjects);
        self.uses = TagSelect::new();
        self.uses.fill_options(&self.known.uses);
    }

    fn populate(&mut self, record: &Record, mode: Mode) {
        let (subjects, uses) = match record {
            Record::Question(q) => {
                self.form = FormState::from_question(q, mode);
                (q.subject.clone(), q.uses.clone())
            }
            Record::Questionnaire(q) => {
                self.form = FormState::from_questionnaire(q, mode);
                (q.subject.clone(), q.uses.clone())
            }
        };

        if mode == Mode::Edit && self.kind == RecordKind::Question {
            for _ in 0..SPARE_ROWS {
                self.form.entries.push(Entry::blank());
            }
        }

        if mode.is_readonly() {
            self.subjects.fill_view_only(&subjects);
            self.uses.fill_view_only(&uses);
        } else {
            self.rebuild_selects();
            self.subjects.fill(&subjects);
            self.uses.fill(&uses);
        }
    }

    /// Copy the tag selections into the form, then recompute.
    fn recompute(&mut self) -> FormView {
        self.form.subjects = self.subjects.collect_selected().into_iter().collect();
        self.form.uses = self.uses.collect_selected().into_iter().collect();
        self.view = self.form.recompute();
        self.view.clone()
    }
}

fn no_entry(index: usize) -> AppError {
    AppError::BadRequest(format!("No entry at index {}", index))
}
