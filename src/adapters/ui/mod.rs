pub mod banner;
pub mod terminal_view;
pub mod tui;

pub use terminal_view::TerminalView;
pub use tui::TuiInputPort;

/// Prints the welcome banner and applies the neon theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
