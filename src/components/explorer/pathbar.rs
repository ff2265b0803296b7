//! Path bar component (macOS Finder style).
//!
//! Displays the breadcrumb trail at the bottom of the explorer. Every crumb
//! but the current directory jumps back to its depth.

use leptos::prelude::*;
use leptos_icons::Icon;

use triox_core::{Breadcrumb, Intent, Session};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/explorer/pathbar.module.css");

/// Path bar component displayed at the bottom of the explorer.
#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let trail = Memo::new(move |_| ctx.session.with(Session::trail));

    view! {
        <nav class=css::pathbar aria-label="Breadcrumb">
            {move || {
                trail
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, crumb)| {
                        let icon = if idx == 0 { ic::HOME } else { ic::FOLDER };
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                <Segment icon=icon crumb=crumb />
                            </>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

/// One crumb; disabled when it is the current directory.
#[component]
fn Segment(icon: icondata::Icon, crumb: Breadcrumb) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let target = crumb.action();
    let class = if target.is_some() {
        css::segment.to_string()
    } else {
        format!("{} {}", css::segment, css::segmentCurrent)
    };

    view! {
        <button
            class=class
            disabled=target.is_none()
            on:click=move |_| {
                if let Some(depth) = target {
                    ctx.dispatch(Intent::JumpToDepth(depth));
                }
            }
        >
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::label>{crumb.label}</span>
        </button>
    }
}
