//! Explorer header component.
//!
//! Contains navigation buttons, current location title, and folder actions.

use leptos::html;
use leptos::prelude::*;
use leptos_icons::Icon;
use log::{debug, warn};
use web_sys::FormData;

use triox_core::{HOME_LABEL, Intent, Session, require_name};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::UPLOAD_FIELD;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// Explorer header with navigation and actions.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_root = Memo::new(move |_| ctx.session.with(|s| s.location().is_root()));
    let loading = Memo::new(move |_| ctx.session.with(Session::is_loading));
    let current_name = Memo::new(move |_| {
        ctx.session
            .with(|s| s.location().name().unwrap_or(HOME_LABEL).to_string())
    });

    view! {
        <header class=css::header>
            <NavButtons is_root=is_root />

            // Current location title (center)
            <div class=css::title>
                <span class=css::titleIcon>
                    {move || {
                        let icon = if is_root.get() { ic::HOME } else { ic::FOLDER };
                        view! { <Icon icon=icon /> }
                    }}
                </span>
                <span class=css::titleLabel>{move || current_name.get()}</span>
                <Show when=move || loading.get()>
                    <span class=css::loading>"Loading…"</span>
                </Show>
            </div>

            <ActionButtons />
        </header>
    }
}

/// Navigation buttons (up, refresh).
#[component]
fn NavButtons(is_root: Memo<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::navButtons>
            <button
                class=move || nav_button_class(is_root.get())
                on:click=move |_| ctx.dispatch(Intent::GoUp)
                disabled=move || is_root.get()
                title="Go to parent directory"
            >
                <Icon icon=ic::UP />
            </button>
            <button
                class=css::navButton
                on:click=move |_| ctx.dispatch(Intent::Refresh)
                title="Refresh"
            >
                <Icon icon=ic::REFRESH />
            </button>
        </div>
    }
}

fn nav_button_class(disabled: bool) -> String {
    if disabled {
        format!("{} {}", css::navButton, css::navButtonDisabled)
    } else {
        css::navButton.to_string()
    }
}

/// Folder actions (new folder, upload).
#[component]
fn ActionButtons() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let form_ref = NodeRef::<html::Form>::new();
    let input_ref = NodeRef::<html::Input>::new();

    let on_new_folder = move |_: leptos::ev::MouseEvent| {
        match require_name(dom::prompt("Name of the new folder", "")) {
            Ok(name) => ctx.dispatch(Intent::CreateDirectory(name)),
            Err(e) => debug!("new folder: {}", e),
        }
    };

    let on_upload = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    // The picker closed with a selection; send the whole form
    let on_files_chosen = move |_: leptos::ev::Event| {
        let Some(form) = form_ref.get() else {
            return;
        };
        match FormData::new_with_form(&form) {
            Ok(data) => ctx.dispatch(Intent::Upload(data)),
            Err(e) => warn!("could not read upload form: {:?}", e),
        }
        form.reset();
    };

    view! {
        <div class=css::actionButtons>
            <button class=css::actionButton on:click=on_new_folder title="New folder">
                <Icon icon=ic::NEW_FOLDER />
            </button>
            <button class=css::actionButton on:click=on_upload title="Upload files">
                <Icon icon=ic::UPLOAD />
            </button>
            <form class=css::uploadForm node_ref=form_ref>
                <input
                    type="file"
                    name=UPLOAD_FIELD
                    multiple=true
                    node_ref=input_ref
                    on:change=on_files_chosen
                />
            </form>
        </div>
    }
}
