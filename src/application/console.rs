use std::{fmt::Display, path::Path};

use colored::Colorize;
use supports_color::Stream;

/// Turns colored output off when stdout cannot render it.
pub fn configure_colors() {
    if supports_color::on(Stream::Stdout).is_none() {
        colored::control::set_override(false);
    }
}

pub fn announce_start(root: &Path) {
    println!("Generating tree for: {}", root.display());
}

pub fn announce_saved(output: &Path, total_lines: usize) {
    let check = "✓".green();
    println!("{check} Tree saved to: {}", output.display());
    println!("{check} Total lines: {total_lines}");
}

pub fn announce_error(err: &impl Display) {
    println!("{} {err}", "Error:".red());
}
