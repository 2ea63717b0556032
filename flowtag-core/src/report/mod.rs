//! Report building: ordered count tables and their text / JSON renditions.

mod render;

pub use render::{PORT_PROTOCOL_SECTION, TAG_SECTION};

use crate::protocol::ProtocolResolver;
use crate::tally::{FlowTally, PortProtocol};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Row ordering inside each report section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrder {
    /// Ascending count, then tag / port / protocol.
    #[default]
    Count,
    /// Tag name; port then protocol.
    Key,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount<'a> {
    pub tag: &'a str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortProtocolCount<'a> {
    pub port: u16,
    pub protocol: &'a str,
    pub count: u64,
}

/// Both count tables, already ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report<'a> {
    pub tag_counts: Vec<TagCount<'a>>,
    pub port_protocol_counts: Vec<PortProtocolCount<'a>>,
}

impl<'a> Report<'a> {
    pub fn new<T, P>(tag_counts: T, port_protocol_counts: P, order: ReportOrder) -> Self
    where
        T: IntoIterator<Item = (&'a str, u64)>,
        P: IntoIterator<Item = (PortProtocol<'a>, u64)>,
    {
        let mut tags: Vec<TagCount<'a>> = tag_counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();

        let mut combos: Vec<PortProtocolCount<'a>> = port_protocol_counts
            .into_iter()
            .map(|(key, count)| PortProtocolCount {
                port: key.port,
                protocol: key.protocol,
                count,
            })
            .collect();

        match order {
            ReportOrder::Count => {
                tags.sort_by(|a, b| (a.count, a.tag).cmp(&(b.count, b.tag)));
                combos.sort_by(|a, b| {
                    (a.count, a.port, a.protocol).cmp(&(b.count, b.port, b.protocol))
                });
            }
            ReportOrder::Key => {
                tags.sort_by(|a, b| a.tag.cmp(b.tag));
                combos.sort_by(|a, b| (a.port, a.protocol).cmp(&(b.port, b.protocol)));
            }
        }

        Self {
            tag_counts: tags,
            port_protocol_counts: combos,
        }
    }

    pub fn from_tally<R>(tally: &FlowTally<'a, R>, order: ReportOrder) -> Self
    where
        R: ProtocolResolver,
    {
        Self::new(
            tally.tag_counts().iter().map(|(tag, count)| (*tag, *count)),
            tally
                .port_protocol_counts()
                .iter()
                .map(|(key, count)| (*key, *count)),
            order,
        )
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
        }
    }

    pub fn tag_total(&self) -> u64 {
        self.tag_counts.iter().map(|t| t.count).sum()
    }

    pub fn port_protocol_total(&self) -> u64 {
        self.port_protocol_counts.iter().map(|p| p.count).sum()
    }
}
