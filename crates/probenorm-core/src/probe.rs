//! The closed vocabulary of probe record tags.
//!
//! Field 0 of every record names the probe that produced it. The vocabulary
//! is fixed at compile time in a perfect-hash map; a tag outside it is
//! classified as [`ProbeTag::Unknown`] rather than being an error, so the
//! caller decides what an unrecognised record means.

use crate::types::TestKind;

/// A classified record tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeTag {
    /// Single-stream HTTP GET throughput.
    HttpGet,
    /// Multi-thread HTTP GET throughput.
    HttpGetMt,
    /// Single-stream HTTP POST throughput.
    HttpPost,
    /// Multi-thread HTTP POST throughput.
    HttpPostMt,
    /// UDP round-trip latency with sent/lost counters.
    UdpLatency,
    /// UDP jitter.
    UdpJitter,
    /// Passive network activity telemetry.
    NetActivity,
    /// Passive CPU activity telemetry.
    CpuActivity,
    /// Closest-target selection line; ends processing of the output.
    ClosestTarget,
    Unknown,
}

static TAGS: phf::Map<&'static str, ProbeTag> = phf::phf_map! {
    "JHTTPGET" => ProbeTag::HttpGet,
    "JHTTPGETMT" => ProbeTag::HttpGetMt,
    "JHTTPPOST" => ProbeTag::HttpPost,
    "JHTTPPOSTMT" => ProbeTag::HttpPostMt,
    "JUDPLATENCY" => ProbeTag::UdpLatency,
    "JUDPJITTER" => ProbeTag::UdpJitter,
    "NETACTIVITY" => ProbeTag::NetActivity,
    "CPUACTIVITY" => ProbeTag::CpuActivity,
    "CLOSESTTARGET" => ProbeTag::ClosestTarget,
};

/// What the pipeline does with a record carrying a given tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Extract results with the named shape.
    Extract(Shape),
    /// Recognised telemetry; produces nothing.
    Discard,
    /// Stop processing the remaining records.
    Stop,
    /// Not in the vocabulary.
    Reject,
}

/// Column layout of a test record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Throughput(TestKind),
    Latency,
    Jitter,
}

impl ProbeTag {
    /// Classify field 0 of a record. Matching is exact and case-sensitive.
    pub fn classify(tag: &str) -> Self {
        TAGS.get(tag).copied().unwrap_or(ProbeTag::Unknown)
    }

    /// The wire spelling of the tag, or `None` for [`ProbeTag::Unknown`].
    pub fn as_str(self) -> Option<&'static str> {
        TAGS.entries()
            .find(|(_, tag)| **tag == self)
            .map(|(name, _)| *name)
    }

    pub fn route(self) -> Route {
        match self {
            ProbeTag::HttpGet | ProbeTag::HttpGetMt => {
                Route::Extract(Shape::Throughput(TestKind::Download))
            }
            ProbeTag::HttpPost | ProbeTag::HttpPostMt => {
                Route::Extract(Shape::Throughput(TestKind::Upload))
            }
            ProbeTag::UdpLatency => Route::Extract(Shape::Latency),
            ProbeTag::UdpJitter => Route::Extract(Shape::Jitter),
            ProbeTag::NetActivity | ProbeTag::CpuActivity => Route::Discard,
            ProbeTag::ClosestTarget => Route::Stop,
            ProbeTag::Unknown => Route::Reject,
        }
    }

    /// The kinds a record with this tag produces, in emission order.
    pub fn kinds(self) -> &'static [TestKind] {
        match self.route() {
            Route::Extract(Shape::Throughput(TestKind::Download)) => &[TestKind::Download],
            Route::Extract(Shape::Throughput(TestKind::Upload)) => &[TestKind::Upload],
            Route::Extract(Shape::Latency) => &[TestKind::Latency, TestKind::PacketLoss],
            Route::Extract(Shape::Jitter) => &[TestKind::Jitter],
            _ => &[],
        }
    }
}
