use super::Report;

pub const TAG_SECTION: &str = "Tag Counts:";
pub const PORT_PROTOCOL_SECTION: &str = "Port/Protocol Combination Counts:";

impl Report<'_> {
    /// Two comma separated sections divided by a blank line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(TAG_SECTION);
        out.push('\n');
        out.push_str("Tag,Count\n");
        for row in &self.tag_counts {
            out.push_str(&format!("{},{}\n", row.tag, row.count));
        }

        out.push('\n');

        out.push_str(PORT_PROTOCOL_SECTION);
        out.push('\n');
        out.push_str("Port,Protocol,Count\n");
        for row in &self.port_protocol_counts {
            out.push_str(&format!("{},{},{}\n", row.port, row.protocol, row.count));
        }

        out
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
