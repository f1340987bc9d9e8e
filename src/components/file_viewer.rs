#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::files::ActionFile;

#[derive(Props, Clone, PartialEq)]
pub struct FileViewerProps {
    pub file: Option<ActionFile>,
}

/// Read-only view of the action file picked in the navigator.
#[component]
pub fn FileViewer(props: FileViewerProps) -> Element {
    let Some(file) = props.file else {
        return rsx! {
            div {
                class: "flex items-center justify-center h-full text-gray-400",
                "Select an action file to view it"
            }
        };
    };

    let origin = match &file.bot_id {
        Some(bot_id) => format!("bot {}", bot_id),
        None => "global".to_string(),
    };

    rsx! {
        div {
            class: "file-viewer flex flex-col h-full",
            div {
                class: "flex items-center justify-between px-4 py-2 border-b text-sm",
                span { class: "font-mono", "{file.location}" }
                span { class: "text-gray-500", "{origin}" }
            }
            pre {
                class: "flex-grow overflow-auto p-4 font-mono text-xs bg-gray-50 dark:bg-gray-900",
                "{file.content}"
            }
        }
    }
}
