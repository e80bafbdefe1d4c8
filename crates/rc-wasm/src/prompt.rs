//! `window.prompt`-backed input provider.

use rc_editor::InputProvider;

/// Asks the user through blocking browser prompts. Outside a browser
/// window every prompt answers `None`.
pub struct BrowserPrompt {
    window: Option<web_sys::Window>,
}

impl BrowserPrompt {
    pub fn new() -> Self {
        Self {
            window: web_sys::window(),
        }
    }

    fn ask(&self, message: &str, default: &str) -> Option<String> {
        let window = self.window.as_ref()?;
        window
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }
}

impl InputProvider for BrowserPrompt {
    fn node_name(&mut self, suggested: &str) -> Option<String> {
        self.ask("Node name", suggested)
    }

    fn edge_weight(&mut self) -> Option<String> {
        self.ask("Edge weight (m)", "1")
    }

    fn graph_name(&mut self, suggested: &str) -> Option<String> {
        self.ask("Graph name", suggested)
    }
}
