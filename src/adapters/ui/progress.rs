//! Progress bar for pack mirroring.

use indicatif::{ProgressBar, ProgressStyle};

const MIRROR_TEMPLATE: &str = "{msg:.cyan} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Bar counting cached stickers of one pack.
pub fn mirror_bar(pack_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template(MIRROR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    bar.set_style(style);
    bar.set_message(pack_name.to_string());
    bar
}
