//! WASM bridge for Route Canvas: exposes the editor engine to the page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM and
//! the `fetch` calls; this crate owns the graph. Network round trips are
//! split in two: `begin_*` hands the page a request (with its generation),
//! `apply_*` feeds the response back. Stale responses are dropped here.

mod prompt;
mod render2d;

pub use prompt::BrowserPrompt;

use rc_core::id::NodeId;
use rc_core::model::{GraphData, Mode, RouteRequest, RouteResult, SaveReceipt};
use rc_editor::session::ask_graph_name;
use rc_editor::views::Views;
use rc_editor::{EditorCommand, EditorState, Generation, InputProvider, Notice};
use rc_render::{CanvasTheme, render_svg};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The page-facing editor controller.
#[wasm_bindgen]
pub struct RouteCanvas {
    state: EditorState,
    views: Views,
    theme: CanvasTheme,
}

#[derive(Serialize)]
struct TicketJson<'a> {
    generation: u64,
    request: &'a RouteRequest,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
impl RouteCanvas {
    /// Create an empty editor sized for a container `width` pixels wide.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64) -> Self {
        console_setup();
        let mut state = EditorState::default();
        state.resize(width);
        state.drain_events();
        let views = Views::new(&state);
        Self {
            state,
            views,
            theme: CanvasTheme::light(),
        }
    }

    /// Handle a click at canvas coordinates. Returns `true` when the page
    /// should redraw.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        self.click_with(x, y, &mut BrowserPrompt::new())
    }

    /// Switch modes by name (`add-node`, `add-edge`, `select-start`,
    /// `select-end`). Unknown names are ignored.
    pub fn set_mode(&mut self, name: &str) -> bool {
        let Some(mode) = Mode::from_name(name) else {
            log::debug!("unknown mode {name:?}");
            return false;
        };
        self.state.execute(EditorCommand::SetMode(mode));
        self.sync()
    }

    pub fn mode(&self) -> String {
        self.state.selection.mode.as_str().to_string()
    }

    pub fn set_start(&mut self, id: &str) -> bool {
        self.state
            .execute(EditorCommand::SelectStart(NodeId::intern(id)));
        self.sync()
    }

    pub fn set_end(&mut self, id: &str) -> bool {
        self.state.execute(EditorCommand::SelectEnd(NodeId::intern(id)));
        self.sync()
    }

    pub fn reset(&mut self) -> bool {
        self.state.execute(EditorCommand::Reset);
        self.sync()
    }

    /// The hosting container changed width.
    pub fn resize(&mut self, width: f64) -> bool {
        self.state.execute(EditorCommand::Resize { width });
        self.sync()
    }

    /// Weight text applied to new edges without prompting. Blank clears it.
    pub fn set_weight_preset(&mut self, text: &str) {
        self.state.set_weight_preset(text);
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let scene = self.state.paint(&self.theme);
        render2d::render_scene(ctx, &scene, self.theme.font_family);
    }

    pub fn to_svg(&self) -> String {
        render_svg(&self.state.paint(&self.theme), self.theme.font_family)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.state.canvas.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.state.canvas.height
    }

    // ─── Projections ─────────────────────────────────────────────────────

    pub fn status(&self) -> String {
        self.views.status.clone()
    }

    pub fn route_info(&self) -> String {
        self.views.route_info.clone()
    }

    /// Node table as JSON `[{id, name, x, y}]`.
    pub fn node_rows(&self) -> String {
        to_json(&self.views.nodes)
    }

    /// Edge table as JSON `[{from, to, weight}]`.
    pub fn edge_rows(&self) -> String {
        to_json(&self.views.edges)
    }

    /// Start/end dropdown entries as JSON `[{id, label}]`.
    pub fn options(&self) -> String {
        to_json(&self.views.options)
    }

    /// Next pending user message, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.views.take_notice().map(|n| n.message())
    }

    // ─── Service round trips ─────────────────────────────────────────────

    /// JSON `{generation, request}` for `POST /route`, or `undefined` when
    /// no start/end is chosen (a notice is queued instead).
    pub fn begin_route(&mut self) -> Option<String> {
        let ticket = self.state.begin_route();
        self.sync();
        let ticket = ticket?;
        Some(to_json(&TicketJson {
            generation: ticket.generation.0,
            request: &ticket.request,
        }))
    }

    /// Feed a `POST /route` response back. Undecodable or empty `json`
    /// counts as "no route". Returns `false` for a stale generation.
    pub fn apply_route(&mut self, generation: u64, json: &str) -> bool {
        let result = serde_json::from_str::<RouteResult>(json).unwrap_or_else(|err| {
            log::warn!("bad route response: {err}");
            RouteResult::empty()
        });
        let applied = self.state.finish_route(Generation(generation), result);
        self.sync();
        applied
    }

    /// Generation to pass back with the matching `apply_graph`.
    pub fn begin_load(&mut self) -> u64 {
        self.state.begin_load().0
    }

    /// Feed a `GET /graphs/{id}` response back. Undecodable `json` is a
    /// failed load.
    pub fn apply_graph(&mut self, generation: u64, json: &str) -> bool {
        let data = serde_json::from_str::<GraphData>(json)
            .map_err(|err| log::warn!("bad graph response: {err}"))
            .ok();
        let applied = self.state.finish_load(Generation(generation), data);
        self.sync();
        applied
    }

    /// Prompt for a name and return the `POST /graphs` body. A cancelled or
    /// blank prompt saves under the default name.
    pub fn save_payload(&mut self) -> String {
        self.save_payload_with(&mut BrowserPrompt::new())
    }

    /// Report the `POST /graphs` outcome: the receipt JSON, or `undefined`
    /// on failure.
    pub fn finish_save(&mut self, receipt_json: Option<String>) {
        let receipt = receipt_json.and_then(|json| serde_json::from_str::<SaveReceipt>(&json).ok());
        let notice = match receipt {
            Some(receipt) => Notice::Saved { name: receipt.name },
            None => Notice::SaveFailed,
        };
        self.state.notify(notice);
        self.sync();
    }
}

impl RouteCanvas {
    /// `click` with an explicit input provider.
    pub fn click_with(&mut self, x: f64, y: f64, input: &mut dyn InputProvider) -> bool {
        self.state.click(x, y, input);
        self.sync()
    }

    pub fn save_payload_with(&mut self, input: &mut dyn InputProvider) -> String {
        let name = ask_graph_name(input);
        to_json(&self.state.save_request(&name))
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Push pending model events into the projections. Returns whether
    /// anything changed.
    fn sync(&mut self) -> bool {
        let events = self.state.drain_events();
        self.views.sync(&self.state, &events)
    }
}

// ─── Console logging / panic hook ────────────────────────────────────────

fn console_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            let _ = console_log::init_with_level(log::Level::Debug);
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Route Canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
