#![allow(non_snake_case)]

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ToolbarProps {
    bot_name: String,
    is_loading: bool,
    on_refresh: EventHandler<()>,
    on_git_sync: EventHandler<()>,
}

#[component]
pub fn Toolbar(props: ToolbarProps) -> Element {
    let ToolbarProps {
        bot_name,
        is_loading,
        on_refresh,
        on_git_sync,
    } = props;

    rsx! {
        div {
            class: "flex items-center justify-between p-4 bg-gray-100 dark:bg-gray-900 border-b",
            h1 {
                class: "text-lg font-semibold",
                "{bot_name}"
            }
            div {
                class: "flex items-center space-x-2",
                button {
                    class: "px-4 py-2 bg-gray-500 text-white rounded hover:bg-gray-600 disabled:opacity-50",
                    disabled: is_loading,
                    onclick: move |_| on_refresh.call(()),
                    if is_loading { "Loading..." } else { "Refresh" }
                }
                button {
                    class: "px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600",
                    onclick: move |_| on_git_sync.call(()),
                    "Git Sync"
                }
            }
        }
    }
}
