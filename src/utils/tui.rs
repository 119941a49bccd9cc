use indicatif::{ProgressBar, ProgressStyle};

/// Frames cycled while the celebration runs.
const FIREWORKS: &[&str] = &["🎆", "🎇", "✨", "🎉", "🌹", "🎊"];

/// A spinner that bursts fireworks on both sides of the message.
pub fn create_celebration(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(FIREWORKS)
            .template("  {spinner} {msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}
