//! Terminal rendering helpers for Sharedash CLI.

use std::io::Write;

use sharedash_core::notify::{NotificationQueue, ToastKind};
use sharedash_core::session::SessionProgress;

const BAR_WIDTH: usize = 30;

/// Redraw the in-place progress line for an active upload.
pub fn draw_progress(progress: &SessionProgress) {
    let line = progress.percentage().map_or_else(
        || format!("  uploading... {} sent", format_bytes(progress.bytes_sent)),
        |pct| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
            format!(
                "  [{}{}] {:>5.1}%  {}",
                "█".repeat(filled.min(BAR_WIDTH)),
                "░".repeat(BAR_WIDTH.saturating_sub(filled)),
                pct,
                format_bytes(progress.bytes_sent),
            )
        },
    );
    print!("\r{line}");
    let _ = std::io::stdout().flush();
}

/// Finish the in-place progress line.
pub fn end_progress_line() {
    println!();
}

/// Print the currently visible toasts, success first prefixed with a check,
/// errors with a cross.
pub fn print_toasts(queue: &NotificationQueue) {
    for toast in queue.active() {
        match toast.kind {
            ToastKind::Success => println!("✓ {}", toast.text),
            ToastKind::Error => eprintln!("✗ {}", toast.text),
        }
    }
}

/// Human-readable byte count.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
