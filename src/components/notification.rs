//! Error banner.
//!
//! Shows the session's current notice. A newer failure replaces the banner
//! instead of stacking, and each notice dismisses itself after
//! [`NOTICE_DISMISS_MS`] unless a newer one took its place.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use triox_core::Intent;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::NOTICE_DISMISS_MS;

stylance::import_crate_style!(css, "src/components/notification.module.css");

#[component]
pub fn Notification() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let notice = Memo::new(move |_| ctx.session.with(|s| s.notice().cloned()));

    Effect::new(move |_| {
        if let Some(id) = notice.with(|n| n.as_ref().map(|n| n.id)) {
            spawn_local(async move {
                TimeoutFuture::new(NOTICE_DISMISS_MS).await;
                ctx.dispatch(Intent::DismissNotice(id));
            });
        }
    });

    let on_dismiss = move |_: leptos::ev::MouseEvent| {
        if let Some(id) = notice.with_untracked(|n| n.as_ref().map(|n| n.id)) {
            ctx.dispatch(Intent::DismissNotice(id));
        }
    };

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class=css::banner role="alert">
                <span class=css::message>
                    {move || notice.with(|n| n.as_ref().map(|n| n.message.clone()).unwrap_or_default())}
                </span>
                <button class=css::dismiss on:click=on_dismiss title="Dismiss">
                    <Icon icon=ic::CLOSE />
                </button>
            </div>
        </Show>
    }
}
