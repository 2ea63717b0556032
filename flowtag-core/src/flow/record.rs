use std::fmt;

pub const FIELD_COUNT: usize = 14;
pub const SUPPORTED_VERSION: &str = "2";

/// A parsed flow log line. Text fields borrow from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord<'a> {
    pub account_id: &'a str,
    pub interface_id: &'a str,
    pub src_addr: &'a str,
    pub dst_addr: &'a str,
    pub src_port: u16,
    pub dst_port: u16,
    pub protocol: u8,
    pub packets: u64,
    pub bytes: u64,
    pub start: u64,
    pub end: u64,
    pub action: &'a str,
    pub log_status: &'a str,
}

/// Fields that must hold a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowField {
    SrcPort,
    DstPort,
    Protocol,
    Packets,
    Bytes,
    Start,
    End,
}

impl FlowField {
    pub fn name(self) -> &'static str {
        match self {
            FlowField::SrcPort => "srcport",
            FlowField::DstPort => "dstport",
            FlowField::Protocol => "protocol",
            FlowField::Packets => "packets",
            FlowField::Bytes => "bytes",
            FlowField::Start => "start",
            FlowField::End => "end",
        }
    }
}

impl fmt::Display for FlowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
