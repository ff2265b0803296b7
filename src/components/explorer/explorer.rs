//! Main explorer component.
//!
//! The file explorer view with header, error banner, file list and path bar.

use leptos::prelude::*;

use super::{FileList, Header, PathBar};
use crate::components::notification::Notification;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    view! {
        <div class=css::explorer>
            <Header />
            <Notification />

            <div class=css::body>
                <FileList />
            </div>

            // Path bar (bottom, macOS Finder style)
            <PathBar />
        </div>
    }
}
