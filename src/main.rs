#![allow(non_snake_case)]

mod api;
mod components;
mod files;
mod logging;
mod settings;
mod tree;
mod validation;

use dioxus::prelude::*;
use dioxus_desktop::{Config, WindowBuilder};
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::components::toast::{use_toaster_provider, Toaster};
use crate::components::{FileNavigator, FileViewer, GitSyncModal, ToastContainer, Toolbar};
use crate::files::{ActionFile, FilesHandle};
use crate::settings::Settings;

fn main() {
    let _log_guard = logging::init(&Settings::config_dir());
    info!("starting app");

    let settings = load_settings();
    info!(
        "bot {} against {}",
        settings.bot_id, settings.api_base_url
    );

    let cfg = Config::new()
        .with_window(WindowBuilder::new().with_title(format!("{} - Bot Workspace", settings.bot_name)))
        .with_custom_head(r#"<link rel="stylesheet" href="tailwind.css">"#.to_string());

    LaunchBuilder::desktop()
        .with_cfg(cfg)
        .with_context(settings)
        .launch(App);
}

fn load_settings() -> Settings {
    let loaded = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .and_then(|runtime| runtime.block_on(Settings::load_default()));

    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

fn refresh_files(
    api: ApiClient,
    bot_id: String,
    mut files: Signal<Option<FilesHandle>>,
    mut is_loading: Signal<bool>,
    mut toaster: Toaster,
) {
    is_loading.set(true);
    spawn(async move {
        match api.fetch_files(&bot_id).await {
            Ok(collections) => files.set(Some(FilesHandle::new(collections))),
            Err(e) => {
                error!("Failed to load action files for {}: {}", bot_id, e);
                toaster.error(format!("Could not load action files: {}", e), bot_id);
            }
        }
        is_loading.set(false);
    });
}

#[component]
fn App() -> Element {
    let settings = use_context::<Settings>();
    let toaster = use_toaster_provider();
    let api = use_hook(|| ApiClient::from_settings(&settings));

    let files = use_signal(|| None::<FilesHandle>);
    let is_loading = use_signal(|| false);
    let mut selected_file = use_signal(|| None::<ActionFile>);
    let mut is_git_sync_open = use_signal(|| false);

    let bot_id = settings.bot_id.clone();
    let bot_name = settings.bot_name.clone();

    use_hook({
        let api = api.clone();
        let bot_id = bot_id.clone();
        move || refresh_files(api, bot_id, files, is_loading, toaster)
    });

    let on_refresh = {
        let api = api.clone();
        let bot_id = bot_id.clone();
        move |_: ()| refresh_files(api.clone(), bot_id.clone(), files, is_loading, toaster)
    };

    // A successful export can rewrite files on the backend.
    let on_exported = {
        let api = api.clone();
        let bot_id = bot_id.clone();
        move |_: ()| refresh_files(api.clone(), bot_id.clone(), files, is_loading, toaster)
    };

    rsx! {
        div {
            class: "flex flex-col h-screen bg-gray-100 dark:bg-gray-800",
            Toolbar {
                bot_name: bot_name.clone(),
                is_loading: *is_loading.read(),
                on_refresh: on_refresh,
                on_git_sync: move |_| is_git_sync_open.set(true),
            }
            div {
                class: "flex flex-grow overflow-hidden",
                div {
                    class: "w-72 overflow-auto border-r bg-white dark:bg-gray-800 p-2",
                    FileNavigator {
                        files: files.read().clone(),
                        bot_name: bot_name.clone(),
                        selection_mode: settings.selection_mode,
                        on_file_selected: move |file: Option<ActionFile>| selected_file.set(file),
                    }
                }
                div {
                    class: "flex-grow overflow-hidden bg-white dark:bg-gray-800",
                    FileViewer { file: selected_file.read().clone() }
                }
            }
            GitSyncModal {
                is_open: *is_git_sync_open.read(),
                bot_id: bot_id.clone(),
                api: api.clone(),
                on_success: on_exported,
                on_toggle: move |_| is_git_sync_open.set(false),
            }
            ToastContainer {}
        }
    }
}
