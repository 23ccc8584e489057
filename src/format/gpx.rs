//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::text::format_accuracy;
use crate::format::OutputFormatter;
use crate::location::Location;

/// GPX formatter - outputs a GPX waypoint file
pub struct GpxFormatter;

/// Escape text for inclusion in XML content
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, location: &Location, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="whereabouts">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            location.timestamp.to_rfc3339()
        ));
        gpx.push_str("  </metadata>\n");

        // Waypoint
        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            location.lat, location.lng
        ));
        gpx.push('\n');
        gpx.push_str(&format!("    <name>{}</name>\n", xml_escape(&location.name)));
        gpx.push_str(&format!(
            "    <desc>Accuracy: {}</desc>\n",
            xml_escape(&format_accuracy(location.accuracy))
        ));
        gpx.push_str("  </wpt>\n");

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
