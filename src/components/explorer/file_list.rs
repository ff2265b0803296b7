//! File list component for explorer view.
//!
//! Folders come first, then files. Clicking a folder enters it, clicking a
//! file downloads it. Each row carries its own rename/copy/move/delete
//! buttons.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;
use log::debug;

use triox_core::{EntryKind, EntryRow, Intent, entry_rows, require_confirmation, require_name};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/file_list.module.css");

#[derive(Clone, Copy, Debug)]
enum RowAction {
    Download,
    Rename,
    Copy,
    Move,
    Delete,
}

const FILE_ACTIONS: &[RowAction] = &[
    RowAction::Download,
    RowAction::Rename,
    RowAction::Copy,
    RowAction::Move,
    RowAction::Delete,
];

const FOLDER_ACTIONS: &[RowAction] = &[
    RowAction::Rename,
    RowAction::Copy,
    RowAction::Move,
    RowAction::Delete,
];

impl RowAction {
    fn label(self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::Rename => "Rename",
            Self::Copy => "Copy",
            Self::Move => "Move",
            Self::Delete => "Delete",
        }
    }

    fn icon(self) -> IconData {
        match self {
            Self::Download => ic::DOWNLOAD,
            Self::Rename => ic::RENAME,
            Self::Copy => ic::COPY,
            Self::Move => ic::MOVE,
            Self::Delete => ic::DELETE,
        }
    }

    /// Ask for whatever the action needs and build the intent.
    ///
    /// Copy and move targets are relative to the current folder and may
    /// name a subfolder (`archive/report.pdf`).
    fn run(self, ctx: AppContext, name: &str) {
        let from = name.to_string();
        let intent = match self {
            Self::Download => Ok(Intent::Download(from)),
            Self::Rename => require_name(dom::prompt("New name", name))
                .map(|to| Intent::Rename { from, to }),
            Self::Copy => require_name(dom::prompt("Copy to (relative to this folder)", name))
                .map(|to| Intent::Copy { from, to }),
            Self::Move => require_name(dom::prompt("Move to (relative to this folder)", name))
                .map(|to| Intent::Move { from, to }),
            Self::Delete => require_confirmation(dom::confirm(&format!("Delete '{}'?", name)))
                .map(|()| Intent::Delete(from)),
        };

        match intent {
            Ok(intent) => ctx.dispatch(intent),
            Err(e) => debug!("{} '{}': {}", self.label(), name, e),
        }
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let rows = Memo::new(move |_| {
        ctx.session
            .with(|s| s.snapshot().map(entry_rows).unwrap_or_default())
    });
    let is_empty = Memo::new(move |_| {
        ctx.session
            .with(|s| s.is_current() && s.snapshot().is_some_and(|snap| snap.is_empty()))
    });
    // Rows of the previous folder stay visible, but inert, until the new
    // listing lands
    let is_stale = Memo::new(move |_| {
        ctx.session
            .with(|s| s.snapshot().is_some() && !s.is_current())
    });

    view! {
        <div
            class=move || {
                if is_stale.get() {
                    format!("{} {}", css::list, css::stale)
                } else {
                    css::list.to_string()
                }
            }
            role="grid"
            aria-label="File list"
        >
            // Column header (desktop only, hidden on mobile via CSS)
            <div class=css::listHeader role="row">
                <span class=css::headerIcon></span>
                <span class=css::headerName>"Name"</span>
                <span class=css::headerKind>"Type"</span>
                <span class=css::headerDate>"Modified"</span>
                <span class=css::headerSize>"Size"</span>
                <span class=css::headerActions></span>
            </div>
            <Show when=move || is_empty.get()>
                <div class=css::empty>"This folder is empty"</div>
            </Show>
            <For
                each=move || rows.get()
                key=|row| row.clone()
                children=move |row| {
                    view! { <FileListItem row=row inert=is_stale /> }
                }
            />
        </div>
    }
}

#[component]
fn FileListItem(row: EntryRow, inert: Memo<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_dir = row.kind == EntryKind::Directory;
    let icon = if is_dir { ic::FOLDER } else { ic::FILE };
    let actions = if is_dir { FOLDER_ACTIONS } else { FILE_ACTIONS };

    let name = row.name.clone();
    let open = move |_: leptos::ev::MouseEvent| {
        if inert.get_untracked() {
            return;
        }
        if is_dir {
            ctx.dispatch(Intent::EnterDirectory(name.clone()));
        } else {
            RowAction::Download.run(ctx, &name);
        }
    };

    let name_class = if is_dir {
        format!("{} {}", css::name, css::nameDir)
    } else {
        format!("{} {}", css::name, css::nameFile)
    };
    let aria_label = format!("{}: {}", row.kind_label, row.name);
    let mobile_date = row.modified.clone();
    let mobile_size = row.size.clone();

    let buttons = actions
        .iter()
        .copied()
        .map(|action| {
            let name = row.name.clone();
            view! {
                <button
                    class=css::rowAction
                    title=action.label()
                    disabled=move || inert.get()
                    on:click=move |_| action.run(ctx, &name)
                >
                    <Icon icon=action.icon() />
                </button>
            }
        })
        .collect_view();

    view! {
        <div class=css::listItem role="row" aria-label=aria_label>
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>

            // Name (with mobile meta inside)
            <div class=css::nameWrapper>
                <button class=name_class disabled=move || inert.get() on:click=open>
                    {row.name.clone()}
                </button>
                <div class=css::mobileMeta>
                    <span>{mobile_date}</span>
                    <span>{mobile_size}</span>
                </div>
            </div>

            <span class=css::itemKind>{row.kind_label}</span>
            <span class=css::itemDate>{row.modified}</span>
            <span class=css::size>{row.size}</span>
            <span class=css::actions>{buttons}</span>
        </div>
    }
}
