//! Root application module.
//!
//! Contains the main App component and the AppContext that connects the
//! engine to Leptos signals.

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::FormData;

use triox_core::{Explorer as Engine, HOME_LABEL, Intent, Outcome, PathStack, Session};

use crate::components::explorer::Explorer;
use crate::config::{self, APP_NAME, AUTH_TOKEN_KEY};
use crate::utils::{FetchTransport, StorageAuth, dom, save_bytes};

/// The engine as wired up in the browser.
pub type WebEngine = Engine<FetchTransport, StorageAuth>;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Components read [`AppContext::session`] and send everything else through
/// [`AppContext::dispatch`]. The signal is written only by the engine's
/// observer.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Mirror of the engine session, updated after every change.
    pub session: RwSignal<Session>,

    engine: StoredValue<WebEngine, LocalStorage>,
}

impl AppContext {
    /// Creates the context, starting at the location in the URL hash.
    pub fn new() -> Self {
        let start = location_from_hash();
        let session = RwSignal::new(Session::at(start.clone()));

        let engine = Engine::starting_at(
            FetchTransport,
            StorageAuth::new(AUTH_TOKEN_KEY),
            config::api_config(),
            start,
        )
        .with_observer(move |state: &Session| {
            dom::replace_hash(&format!("#/{}", state.location().encoded()));
            session.set(state.clone());
        });

        Self {
            session,
            engine: StoredValue::new_local(engine),
        }
    }

    /// Hand an intent to the engine. Completion shows up through
    /// [`AppContext::session`].
    pub fn dispatch(&self, intent: Intent<FormData>) {
        let engine = self.engine.get_value();
        spawn_local(async move {
            match engine.handle(intent).await {
                Ok(Outcome::Downloaded(file)) => {
                    if let Err(e) = save_bytes(&file.name, &file.bytes) {
                        warn!("could not save '{}': {:?}", file.path, e);
                    }
                }
                Ok(_) => {}
                // Already reflected in the session notice
                Err(err) => debug!("intent failed: {}", err),
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Location encoded in `#/<path>`, root when missing or malformed.
fn location_from_hash() -> PathStack {
    let hash = dom::get_hash();
    PathStack::parse_encoded(hash.trim_start_matches('/')).unwrap_or_else(|e| {
        warn!("ignoring location in URL: {}", e);
        PathStack::root()
    })
}

/// Follow hash edits and back/forward buttons.
#[cfg(target_arch = "wasm32")]
fn watch_hash(ctx: AppContext) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;

    let closure = Closure::wrap(Box::new(move || {
        let location = location_from_hash();
        if ctx.session.with_untracked(|s| s.location() != &location) {
            ctx.dispatch(Intent::Load(location));
        }
    }) as Box<dyn Fn()>);

    if let Some(window) = dom::window() {
        let _ =
            window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    }

    // Keep the closure alive for the lifetime of the app
    closure.forget();
}

/// Root application component.
///
/// Creates and provides the [`AppContext`], loads the first listing and
/// renders the explorer.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    #[cfg(target_arch = "wasm32")]
    watch_hash(ctx);

    // Tab title follows the current folder
    Effect::new(move |_| {
        let name = ctx
            .session
            .with(|s| s.location().name().unwrap_or(HOME_LABEL).to_string());
        document().set_title(&format!("{} - {}", name, APP_NAME));
    });

    ctx.dispatch(Intent::Refresh);

    view! { <Explorer /> }
}
