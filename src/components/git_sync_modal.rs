#![allow(non_snake_case)]

use dioxus::prelude::*;
use tracing::{debug, error, info};

use crate::api::{ApiClient, ApiError, CommitAuthor, ExportRequest};
use crate::components::toast::{notify_success, Toaster};
use crate::validation::{validate_field, FieldError, MAX_FIELD_LEN, MIN_FIELD_LEN};

pub const SUCCESS_MESSAGE: &str = "Changes pushed to main!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    Message,
    AuthorName,
    AuthorEmail,
    SecurityToken,
}

impl CommitField {
    pub const ALL: [CommitField; 4] = [
        CommitField::Message,
        CommitField::AuthorName,
        CommitField::AuthorEmail,
        CommitField::SecurityToken,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommitField::Message => "Commit Message",
            CommitField::AuthorName => "Commit Author Name",
            CommitField::AuthorEmail => "Commit Author Email",
            CommitField::SecurityToken => "Git Security Token",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            CommitField::Message => "Your simple commit message",
            CommitField::AuthorName => "Name of the commit author",
            CommitField::AuthorEmail => "Email of the commit author",
            CommitField::SecurityToken => "The personal token to push commits",
        }
    }

    pub fn input_id(&self) -> &'static str {
        match self {
            CommitField::Message => "input-gitCommitMessage",
            CommitField::AuthorName => "input-gitCommitAuthorName",
            CommitField::AuthorEmail => "input-gitCommitAuthorEmail",
            CommitField::SecurityToken => "input-gitSecurityToken",
        }
    }

    fn helper_text(&self) -> Option<&'static str> {
        match self {
            CommitField::Message => {
                Some("The default commit branch is main/master, you cannot change it at this point.")
            }
            _ => None,
        }
    }

    fn input_type(&self) -> &'static str {
        match self {
            CommitField::SecurityToken => "password",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Exported,
    Failed,
    /// The dialog was closed while the request was out; nothing was applied.
    Stale,
}

/// An export handed out by [`GitSyncForm::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    pub request: ExportRequest,
}

/// Everything the git sync dialog keeps between renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitSyncForm {
    pub commit_message: String,
    pub author_name: String,
    pub author_email: String,
    pub security_token: String,
    pub is_processing: bool,
    /// Never advanced by the export call; kept for the upload label.
    pub progress: u8,
    pub error: Option<String>,
    /// Left over from the bot import flow; every edit clears it.
    pub overwrite: bool,
    /// Bumped by every reset. Answers to older submissions are dropped.
    generation: u64,
    /// Ticket of the export still awaiting an answer. Survives `reset`, so an
    /// abandoned request keeps the gate closed until it settles.
    pending: Option<u64>,
}

impl GitSyncForm {
    pub fn value(&self, field: CommitField) -> &str {
        match field {
            CommitField::Message => &self.commit_message,
            CommitField::AuthorName => &self.author_name,
            CommitField::AuthorEmail => &self.author_email,
            CommitField::SecurityToken => &self.security_token,
        }
    }

    pub fn set_field(&mut self, field: CommitField, value: String) {
        let slot = match field {
            CommitField::Message => &mut self.commit_message,
            CommitField::AuthorName => &mut self.author_name,
            CommitField::AuthorEmail => &mut self.author_email,
            CommitField::SecurityToken => &mut self.security_token,
        };
        *slot = value;
        self.overwrite = false;
    }

    pub fn field_error(&self, field: CommitField) -> Option<FieldError> {
        validate_field(self.value(field)).err()
    }

    pub fn is_valid(&self) -> bool {
        CommitField::ALL
            .iter()
            .all(|field| self.field_error(*field).is_none())
    }

    pub fn can_submit(&self) -> bool {
        !self.is_processing
            && self.pending.is_none()
            && CommitField::ALL.iter().all(|field| !self.value(*field).is_empty())
            && self.is_valid()
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            commit_message: self.commit_message.clone(),
            author: CommitAuthor {
                name: self.author_name.clone(),
                email: self.author_email.clone(),
            },
            security_token: self.security_token.clone(),
        }
    }

    /// Marks the form as in flight and hands back the request to send, or
    /// `None` when the gate is closed.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        self.is_processing = true;
        self.progress = 0;
        self.error = None;
        self.pending = Some(self.generation);
        Some(Submission {
            ticket: self.generation,
            request: self.export_request(),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn finish_submit(&mut self, ticket: u64, result: Result<(), ApiError>) -> SubmitOutcome {
        if self.pending == Some(ticket) {
            self.pending = None;
        }
        if ticket != self.generation {
            return SubmitOutcome::Stale;
        }

        let outcome = match result {
            Ok(()) => {
                self.reset();
                SubmitOutcome::Exported
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.is_processing = false;
                SubmitOutcome::Failed
            }
        };
        self.progress = 0;
        outcome
    }

    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            pending: self.pending,
            ..Self::default()
        };
    }

    pub fn button_label(&self) -> String {
        match (self.is_processing, self.progress) {
            (false, _) => "Commit & Push".to_string(),
            (true, 0) => "Processing...".to_string(),
            (true, progress) => format!("Uploading... {}%", progress),
        }
    }
}

fn close_dialog(mut form: Signal<GitSyncForm>, on_toggle: Option<EventHandler<()>>) {
    form.write().reset();
    if let Some(on_toggle) = on_toggle {
        on_toggle.call(());
    }
}

/// Sends the form as an export when the gate is open. The answer is applied
/// to the form only if the dialog was not closed in the meantime.
pub fn submit_export(
    mut form: Signal<GitSyncForm>,
    api: ApiClient,
    bot_id: String,
    toaster: Option<Toaster>,
    on_success: Option<EventHandler<()>>,
    on_toggle: Option<EventHandler<()>>,
) {
    let Some(Submission { ticket, request }) = form.write().begin_submit() else {
        return;
    };

    spawn(async move {
        let result = api.export_to_git(&bot_id, &request).await;
        match &result {
            Err(ApiError::Status { status, message }) => {
                error!(status, "Git export of {} rejected: {}", bot_id, message)
            }
            Err(e) => error!("Git export of {} failed: {}", bot_id, e),
            Ok(()) => {}
        }

        let outcome = form.write().finish_submit(ticket, result);
        match outcome {
            SubmitOutcome::Exported => {}
            SubmitOutcome::Failed => return,
            SubmitOutcome::Stale => {
                debug!("Dropping answer for closed git sync of {}", bot_id);
                return;
            }
        }

        info!("Git export of {} done", bot_id);
        notify_success(toaster, SUCCESS_MESSAGE, &bot_id);
        if let Some(on_success) = on_success {
            on_success.call(());
        }
        close_dialog(form, on_toggle);
    });
}

#[derive(Props, Clone, PartialEq)]
pub struct GitSyncModalProps {
    pub is_open: bool,
    pub bot_id: String,
    pub api: ApiClient,
    pub on_success: Option<EventHandler<()>>,
    pub on_toggle: Option<EventHandler<()>>,
}

#[component]
pub fn GitSyncModal(props: GitSyncModalProps) -> Element {
    let GitSyncModalProps {
        is_open,
        bot_id,
        api,
        on_success,
        on_toggle,
    } = props;

    let mut form = use_signal(GitSyncForm::default);
    let toaster = try_use_context::<Toaster>();

    if !is_open {
        return rsx! {};
    }

    let handle_submit = move |_: ()| {
        submit_export(
            form,
            api.clone(),
            bot_id.clone(),
            toaster,
            on_success,
            on_toggle,
        )
    };

    rsx! {
        GitSyncDialog {
            form: form.read().clone(),
            on_input: move |(field, value): (CommitField, String)| form.write().set_field(field, value),
            on_submit: handle_submit,
            on_close: move |_| close_dialog(form, on_toggle),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct GitSyncDialogProps {
    pub form: GitSyncForm,
    pub on_input: EventHandler<(CommitField, String)>,
    pub on_submit: EventHandler<()>,
    pub on_close: EventHandler<()>,
}

/// Stateless rendering of the dialog for a given form snapshot.
#[component]
pub fn GitSyncDialog(props: GitSyncDialogProps) -> Element {
    let GitSyncDialogProps {
        form,
        on_input,
        on_submit,
        on_close,
    } = props;

    let can_submit = form.can_submit();
    let button_label = form.button_label();
    let error_banner = form.error.clone().map(|message| {
        rsx! {
            div {
                class: "git-sync-error bg-red-100 border border-red-400 text-red-700 rounded px-3 py-2 mb-3 text-sm",
                role: "alert",
                "{message}"
            }
        }
    });

    let rows: Vec<(CommitField, String, Option<String>)> = CommitField::ALL
        .iter()
        .map(|field| {
            let value = form.value(*field).to_string();
            let hint = if value.is_empty() {
                None
            } else {
                form.field_error(*field).map(|e| e.to_string())
            };
            (*field, value, hint)
        })
        .collect();

    rsx! {
        div {
            class: "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-40",
            div {
                class: "git-sync-dialog bg-white dark:bg-gray-800 rounded-lg w-[32rem] shadow-lg",
                div {
                    class: "flex items-center justify-between border-b border-gray-200 dark:border-gray-700 px-6 py-3",
                    h2 {
                        class: "text-xl font-semibold",
                        "Git Sync"
                    }
                    button {
                        class: "git-sync-close text-gray-500 hover:text-gray-700",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                form {
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        on_submit.call(());
                    },
                    div {
                        class: "px-6 py-4 space-y-4",
                        for (field, value, hint) in rows {
                            div {
                                key: "{field.input_id()}",
                                label {
                                    class: "block text-sm font-medium text-gray-700 dark:text-gray-200 mb-1",
                                    r#for: field.input_id(),
                                    "{field.label()}"
                                    if field == CommitField::Message {
                                        span { class: "text-gray-400 ml-1", "*" }
                                    }
                                }
                                input {
                                    id: field.input_id(),
                                    class: "w-full bg-white dark:bg-gray-900 border border-gray-300 dark:border-gray-600 rounded px-3 py-2 text-sm",
                                    r#type: field.input_type(),
                                    placeholder: field.placeholder(),
                                    minlength: "{MIN_FIELD_LEN}",
                                    maxlength: "{MAX_FIELD_LEN}",
                                    value: "{value}",
                                    oninput: move |evt| on_input.call((field, evt.value())),
                                }
                                {field.helper_text().map(|helper| rsx! {
                                    p { class: "text-xs text-gray-500 mt-1", "{helper}" }
                                })}
                                {hint.map(|hint| rsx! {
                                    p { class: "git-sync-hint text-xs text-red-600 mt-1", "{hint}" }
                                })}
                            }
                        }
                    }
                    div {
                        class: "border-t border-gray-200 dark:border-gray-700 px-6 py-3",
                        {error_banner}
                        div {
                            class: "flex justify-end",
                            button {
                                id: "btn-import-bot",
                                class: "px-4 py-2 text-sm font-medium text-white bg-blue-600 rounded-md hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed",
                                r#type: "submit",
                                disabled: !can_submit,
                                "{button_label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
