// SVG wordcloud renderer.
//
// Writes one `topic<i>.svg` per topic into the output directory. Keywords
// are laid out one per row with the font size scaled by the keyword's
// weight relative to the heaviest keyword of that topic.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::traits::TopicKeywords;

const WIDTH: u32 = 640;
const MARGIN: u32 = 24;
const MIN_FONT: f64 = 14.0;
const MAX_FONT: f64 = 42.0;
const ROW_GAP: u32 = 10;

// Rotating fill palette, one color per row.
const PALETTE: [&str; 5] = ["#1f77b4", "#d62728", "#2ca02c", "#9467bd", "#e377c2"];

pub struct SvgWordcloudRenderer;

impl SvgWordcloudRenderer {
    /// Render one SVG per topic into `output_dir`.
    pub fn render(&self, topics: &[TopicKeywords], output_dir: &Path) -> Result<()> {
        for topic in topics {
            let svg = topic_svg(topic);
            let path = output_dir.join(format!("topic{}.svg", topic.topic_id));
            fs::write(&path, svg)
                .with_context(|| format!("Failed to write wordcloud {}", path.display()))?;
        }
        debug!(topics = topics.len(), "rendered wordcloud set");
        Ok(())
    }
}

fn topic_svg(topic: &TopicKeywords) -> String {
    let max_weight = topic
        .keywords
        .iter()
        .map(|(_, w)| *w)
        .fold(0.0f64, f64::max);

    let mut rows = String::new();
    let mut y = MARGIN as f64;
    for (i, (word, weight)) in topic.keywords.iter().enumerate() {
        let scale = if max_weight > 0.0 {
            weight / max_weight
        } else {
            0.0
        };
        let font_size = MIN_FONT + (MAX_FONT - MIN_FONT) * scale;
        y += font_size;
        rows.push_str(&format!(
            "  <text x=\"{MARGIN}\" y=\"{y:.0}\" font-family=\"sans-serif\" \
             font-size=\"{font_size:.0}\" fill=\"{}\">{}</text>\n",
            PALETTE[i % PALETTE.len()],
            xml_escape(word),
        ));
        y += ROW_GAP as f64;
    }
    let height = (y + MARGIN as f64) as u32;

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{height}\">\n\
         \x20 <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         {rows}</svg>\n"
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
