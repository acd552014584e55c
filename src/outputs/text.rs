//! Plain-text listing of records.
//!
//! ```text
//! --------------------------------------------------
//! Building agents
//! https://www.youtube.com/watch?v=abc123 ID = abc123
//! 2024-01-15 10:30:00+00:00
//! Today we are going to talk about....
//! --------------------------------------------------
//! ```

use crate::models::NormalizedRecord;
use crate::utils::preview;

const SEPARATOR_WIDTH: usize = 50;
const PREVIEW_CHARS: usize = 200;

/// Render records as separator-delimited blocks.
///
/// When `show_content` is set, each block ends with a preview of the
/// enrichment text, or a placeholder when the lookup produced nothing.
pub fn render_records(records: &[NormalizedRecord], show_content: bool) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = format!("{separator}\n");

    for record in records {
        out.push_str(&format!("{}\n", record.title));
        match record.video_id() {
            Some(id) => out.push_str(&format!("{} ID = {}\n", record.url, id)),
            None => out.push_str(&format!("{}\n", record.url)),
        }
        out.push_str(&format!("{}\n", record.published_at.format("%Y-%m-%d %H:%M:%S%:z")));

        if show_content {
            let line = match record.content.as_deref().filter(|c| !c.is_empty()) {
                Some(content) => preview(content, PREVIEW_CHARS),
                None if record.video.is_some() => "No transcript".to_string(),
                None => "No content".to_string(),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&separator);
        out.push('\n');
    }

    out
}
