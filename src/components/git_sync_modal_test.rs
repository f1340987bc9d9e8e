#![cfg(test)]
use crate::api::{ApiClient, ApiError};
use crate::components::git_sync_modal::{
    submit_export, CommitField, GitSyncDialog, GitSyncForm, GitSyncModal, GitSyncModalProps,
    SubmitOutcome,
};
use crate::components::toast::use_toaster_provider;
use crate::components::ToastContainer;
use crate::validation::FieldError;
use dioxus::prelude::*;
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn filled_form() -> GitSyncForm {
    let mut form = GitSyncForm::default();
    form.set_field(CommitField::Message, "Update greeting flow".to_string());
    form.set_field(CommitField::AuthorName, "Jane Doe".to_string());
    form.set_field(CommitField::AuthorEmail, "jane@example.com".to_string());
    form.set_field(CommitField::SecurityToken, "ghp_secret".to_string());
    form
}

fn assert_fields_empty(form: &GitSyncForm) {
    for field in CommitField::ALL {
        assert_eq!(form.value(field), "", "{:?} should be reset", field);
    }
}

#[test]
fn test_field_handlers_store_value_and_clear_overwrite() {
    let mut form = GitSyncForm::default();
    form.overwrite = true;

    form.set_field(CommitField::AuthorEmail, "jane@example.com".to_string());
    assert_eq!(form.author_email, "jane@example.com");
    assert!(!form.overwrite);

    form.overwrite = true;
    form.set_field(CommitField::SecurityToken, "tok".to_string());
    assert_eq!(form.security_token, "tok");
    assert!(!form.overwrite);
}

#[test]
fn test_submit_gate_follows_empty_fields() {
    let mut form = GitSyncForm::default();
    assert!(!form.can_submit());

    form.set_field(CommitField::Message, "Update greeting flow".to_string());
    form.set_field(CommitField::AuthorName, "Jane Doe".to_string());
    form.set_field(CommitField::AuthorEmail, "jane@example.com".to_string());
    assert!(!form.can_submit(), "token still empty");

    form.set_field(CommitField::SecurityToken, "ghp_secret".to_string());
    assert!(form.can_submit(), "all four filled");

    form.set_field(CommitField::AuthorName, String::new());
    assert!(!form.can_submit(), "clearing one field closes the gate again");
}

#[test]
fn test_submit_gate_follows_length_bounds() {
    let mut form = filled_form();

    form.set_field(CommitField::AuthorName, "Jo".to_string());
    assert!(!form.can_submit());
    assert_eq!(
        form.field_error(CommitField::AuthorName),
        Some(FieldError::TooShort { min: 3, actual: 2 })
    );

    form.set_field(CommitField::AuthorName, "Joe".to_string());
    assert!(form.can_submit());

    form.set_field(CommitField::Message, "m".repeat(501));
    assert!(!form.can_submit());
    form.set_field(CommitField::Message, "m".repeat(500));
    assert!(form.can_submit());
}

#[test]
fn test_submit_gate_closed_while_processing() {
    let mut form = filled_form();
    let request = form.begin_submit().expect("gate open").request;

    assert!(form.is_processing);
    assert_eq!(form.progress, 0);
    assert_eq!(request.commit_message, "Update greeting flow");
    assert_eq!(request.author.name, "Jane Doe");
    assert_eq!(request.author.email, "jane@example.com");
    assert_eq!(request.security_token, "ghp_secret");

    assert!(!form.can_submit());
    assert!(form.begin_submit().is_none(), "no duplicate submission");
    assert_eq!(form.button_label(), "Processing...");
}

#[test]
fn test_button_label() {
    let mut form = filled_form();
    assert_eq!(form.button_label(), "Commit & Push");
    form.is_processing = true;
    form.progress = 40;
    assert_eq!(form.button_label(), "Uploading... 40%");
}

#[test]
fn test_reset_clears_everything() {
    let mut form = filled_form();
    form.error = Some("old failure".to_string());
    form.reset();

    assert_fields_empty(&form);
    assert!(!form.is_processing);
    assert!(!form.overwrite);
    assert!(form.error.is_none());
    assert_eq!(form.progress, 0);
    assert_eq!(form.button_label(), "Commit & Push");
}

#[test]
fn test_retry_clears_previous_error() {
    let mut form = filled_form();
    form.error = Some("token invalid".to_string());

    form.begin_submit().expect("gate open");
    assert!(form.error.is_none());
}

#[test]
fn test_closing_during_export_blocks_second_submission() {
    let mut form = filled_form();
    let first = form.begin_submit().expect("gate open");

    form.reset();
    assert_fields_empty(&form);
    form.set_field(CommitField::Message, "Second attempt".to_string());
    form.set_field(CommitField::AuthorName, "Jane Doe".to_string());
    form.set_field(CommitField::AuthorEmail, "jane@example.com".to_string());
    form.set_field(CommitField::SecurityToken, "ghp_secret".to_string());

    assert!(form.is_pending());
    assert!(!form.can_submit());
    assert!(form.begin_submit().is_none(), "first export is still out");

    let late = ApiError::Status {
        status: 400,
        message: "token invalid".to_string(),
    };
    assert_eq!(form.finish_submit(first.ticket, Err(late)), SubmitOutcome::Stale);
    assert!(form.error.is_none(), "late failure is not shown in the new dialog");
    assert_eq!(form.commit_message, "Second attempt");
    assert!(!form.is_pending());

    let second = form.begin_submit().expect("gate opens once the first export settles");
    assert_ne!(second.ticket, first.ticket);
    assert_eq!(second.request.commit_message, "Second attempt");
}

#[test]
fn test_late_success_leaves_reopened_form_alone() {
    let mut form = filled_form();
    let first = form.begin_submit().expect("gate open");

    form.reset();
    form.set_field(CommitField::Message, "Typed after reopening".to_string());

    assert_eq!(form.finish_submit(first.ticket, Ok(())), SubmitOutcome::Stale);
    assert_eq!(form.commit_message, "Typed after reopening");
}

#[tokio::test]
async fn test_successful_export_resets_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/admin/workspace/bots/welcome-bot/git/export")
        .match_body(Matcher::Json(json!({
            "commitMessage": "Update greeting flow",
            "author": { "name": "Jane Doe", "email": "jane@example.com" },
            "securityToken": "ghp_secret"
        })))
        .with_status(200)
        .create_async()
        .await;
    let api = ApiClient::new(server.url());

    let mut form = filled_form();
    let submission = form.begin_submit().unwrap();
    let result = api.export_to_git("welcome-bot", &submission.request).await;
    let outcome = form.finish_submit(submission.ticket, result);

    mock.assert_async().await;
    assert_eq!(outcome, SubmitOutcome::Exported);
    assert_fields_empty(&form);
    assert!(!form.is_processing);
    assert!(form.error.is_none());
    assert_eq!(form.progress, 0);
}

#[tokio::test]
async fn test_rejected_export_keeps_dialog_state() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/admin/workspace/bots/welcome-bot/git/export")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"token invalid"}"#)
        .create_async()
        .await;
    let api = ApiClient::new(server.url());

    let mut form = filled_form();
    let submission = form.begin_submit().unwrap();
    let result = api.export_to_git("welcome-bot", &submission.request).await;
    let outcome = form.finish_submit(submission.ticket, result);

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.error.as_deref(), Some("token invalid"));
    assert!(!form.is_processing);
    assert_eq!(form.progress, 0);
    assert_eq!(form.commit_message, "Update greeting flow");
    assert_eq!(form.author_name, "Jane Doe");
    assert_eq!(form.author_email, "jane@example.com");
    assert_eq!(form.security_token, "ghp_secret");
    assert!(form.can_submit(), "user can retry right away");
}

#[test]
fn test_closed_modal_renders_nothing() {
    let mut vdom = VirtualDom::new_with_props(
        GitSyncModal,
        GitSyncModalProps {
            is_open: false,
            bot_id: "welcome-bot".to_string(),
            api: ApiClient::new("http://localhost:3000/api/v2"),
            on_success: None,
            on_toggle: None,
        },
    );
    vdom.rebuild_in_place();
    assert!(!dioxus_ssr::render(&vdom).contains("Git Sync"));
}

#[test]
fn test_open_modal_renders_form() {
    let mut vdom = VirtualDom::new_with_props(
        GitSyncModal,
        GitSyncModalProps {
            is_open: true,
            bot_id: "welcome-bot".to_string(),
            api: ApiClient::new("http://localhost:3000/api/v2"),
            on_success: None,
            on_toggle: None,
        },
    );
    vdom.rebuild_in_place();
    let html = dioxus_ssr::render(&vdom);

    assert!(html.contains("Git Sync"));
    assert!(html.contains("Commit &amp; Push") || html.contains("Commit & Push"));
    assert!(html.contains("input-gitSecurityToken"));
    assert!(!html.contains("git-sync-error"));
}

#[test]
fn test_dialog_shows_error_and_keeps_values() {
    #[allow(non_snake_case)]
    fn TestComponent() -> Element {
        let mut form = filled_form();
        form.error = Some("token invalid".to_string());

        rsx! {
            GitSyncDialog {
                form: form,
                on_input: move |_| {},
                on_submit: move |_| {},
                on_close: move |_| {},
            }
        }
    }

    let mut vdom = VirtualDom::new(TestComponent);
    vdom.rebuild_in_place();
    let html = dioxus_ssr::render(&vdom);

    assert!(html.contains("git-sync-error"));
    assert!(html.contains("token invalid"));
    assert!(html.contains("Update greeting flow"));
    assert!(html.contains("jane@example.com"));
}

#[test]
fn test_dialog_shows_length_hint() {
    #[allow(non_snake_case)]
    fn TestComponent() -> Element {
        let mut form = filled_form();
        form.set_field(CommitField::AuthorName, "Jo".to_string());

        rsx! {
            GitSyncDialog {
                form: form,
                on_input: move |_| {},
                on_submit: move |_| {},
                on_close: move |_| {},
            }
        }
    }

    let mut vdom = VirtualDom::new(TestComponent);
    vdom.rebuild_in_place();
    let html = dioxus_ssr::render(&vdom);

    assert!(html.contains("Use at least 3 characters (currently 2)"));
}

#[derive(Props, Clone, PartialEq)]
struct SubmitHarnessProps {
    api: ApiClient,
    #[props(default)]
    close_right_away: bool,
}

/// Hosts a filled form and fires one export on mount, like a click on the
/// submit button would.
#[allow(non_snake_case)]
fn SubmitHarness(props: SubmitHarnessProps) -> Element {
    let toaster = use_toaster_provider();
    let mut form = use_signal(filled_form);
    let mut successes = use_signal(|| 0);
    let mut closes = use_signal(|| 0);

    use_hook(|| {
        let on_success = EventHandler::new(move |_: ()| *successes.write() += 1);
        let on_toggle = EventHandler::new(move |_: ()| *closes.write() += 1);
        submit_export(
            form,
            props.api.clone(),
            "welcome-bot".to_string(),
            Some(toaster),
            Some(on_success),
            Some(on_toggle),
        );
        if props.close_right_away {
            form.write().reset();
        }
    });

    let pending = form.read().is_pending();

    rsx! {
        span { "successes={successes} closes={closes} pending={pending}" }
        GitSyncDialog {
            form: form.read().clone(),
            on_input: move |_| {},
            on_submit: move |_| {},
            on_close: move |_| {},
        }
        ToastContainer {}
    }
}

/// Polls the dom until `done` holds for its markup or the attempts run out.
async fn settle(vdom: &mut VirtualDom, done: impl Fn(&str) -> bool) -> String {
    for _ in 0..100 {
        let html = dioxus_ssr::render(vdom);
        if done(&html) {
            return html;
        }
        let _ = tokio::time::timeout(Duration::from_millis(50), vdom.wait_for_work()).await;
        let _ = vdom.render_immediate_to_vec();
    }
    dioxus_ssr::render(vdom)
}

#[tokio::test]
async fn test_submit_success_notifies_and_closes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/admin/workspace/bots/welcome-bot/git/export")
        .with_status(200)
        .create_async()
        .await;

    let mut vdom = VirtualDom::new_with_props(
        SubmitHarness,
        SubmitHarnessProps {
            api: ApiClient::new(server.url()),
            close_right_away: false,
        },
    );
    vdom.rebuild_in_place();
    let html = settle(&mut vdom, |html| html.contains("pending=false")).await;

    mock.assert_async().await;
    assert!(html.contains("successes=1 closes=1"), "{}", html);
    assert!(html.contains("Changes pushed to main!"));
    assert!(html.contains("toast-success"));
    assert!(!html.contains("Update greeting flow"), "fields are reset");
}

#[tokio::test]
async fn test_submit_rejection_shows_banner_and_stays_open() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/admin/workspace/bots/welcome-bot/git/export")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"token invalid"}"#)
        .create_async()
        .await;

    let mut vdom = VirtualDom::new_with_props(
        SubmitHarness,
        SubmitHarnessProps {
            api: ApiClient::new(server.url()),
            close_right_away: false,
        },
    );
    vdom.rebuild_in_place();
    let html = settle(&mut vdom, |html| html.contains("pending=false")).await;

    assert!(html.contains("successes=0 closes=0"), "{}", html);
    assert!(html.contains("git-sync-error"));
    assert!(html.contains("token invalid"));
    assert!(html.contains("Update greeting flow"), "fields are kept");
    assert!(!html.contains("toast-success"));
}

#[tokio::test]
async fn test_answer_after_close_is_dropped() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/admin/workspace/bots/welcome-bot/git/export")
        .with_status(200)
        .create_async()
        .await;

    let mut vdom = VirtualDom::new_with_props(
        SubmitHarness,
        SubmitHarnessProps {
            api: ApiClient::new(server.url()),
            close_right_away: true,
        },
    );
    vdom.rebuild_in_place();
    assert!(dioxus_ssr::render(&vdom).contains("pending=true"));

    let html = settle(&mut vdom, |html| html.contains("pending=false")).await;

    mock.assert_async().await;
    assert!(html.contains("successes=0 closes=0"), "{}", html);
    assert!(!html.contains("toast-success"));
}
