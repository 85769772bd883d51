//! # Output Formatting
//!
//! Colored, emoji-prefixed messages for the terminal.

use owo_colors::OwoColorize;

/// When colored output is used
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Get an emoji by shortcode, or a fallback character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format an issue key
pub fn format_issue_key(key: &str) -> String {
  key.bright_cyan().bold().to_string()
}

/// Format a workflow status, highlighting closed issues
pub fn format_status(status: &str, closed: bool) -> String {
  if closed {
    status.green().to_string()
  } else {
    status.yellow().to_string()
  }
}

/// Format a version name with its release state
pub fn format_version(name: &str, released: bool) -> String {
  if released {
    format!("{} {}", name.green().bold(), "(released)".bright_black())
  } else {
    name.yellow().bold().to_string()
  }
}

pub fn format_url(url: &str) -> String {
  url.bright_black().underline().to_string()
}
