//! Static probe output corpora used across harnesses.

/// The alias table most harnesses resolve against.
pub const HOSTS: &[(&str, &str)] = &[
    ("n1-london.example.net", "London"),
    ("n2-paris.example.net", "Paris"),
];

/// One record of every test shape plus interleaved telemetry, in the order a
/// scheduled run emits them.
pub const CORPUS_TESTS: &[&str] = &[
    "NETACTIVITY;1364383790;eth0;1024;2048",
    "JHTTPGETMT;1364383796;OK;n1-london.example.net;3;10000000;5000000;1250000;3;0",
    "JHTTPPOST;1364383801;OK;n2-paris.example.net;1;2000000;5000000;62500;1;0",
    "JUDPLATENCY;1364383810;OK;n1-london.example.net;80;25400;24000;30000;1200;8;2;10",
    "CPUACTIVITY;1364383812;37",
    "JUDPJITTER;1364383820;FAIL;n3-berlin.example.net;5000;200;1000;5;2;180;190;0;850",
];

/// Records after a closest-target line that must never be processed.
pub const CORPUS_AFTER_CLOSEST: &[&str] = &[
    "CLOSESTTARGET;n1-london.example.net",
    "JHTTPGET;1364383830;OK;n1-london.example.net;1;1000;1000;1000;1;0",
];

/// Records that are each broken in a different way.
pub const CORPUS_MALFORMED: &[&str] = &[
    "JHTTPGET;not-a-time;OK;n1-london.example.net;1;0;0;1000;1;0",
    "JHTTPPOST;1364383801;OK;n2-paris.example.net",
    "JUDPLATENCY;1364383810;OK;n1-london.example.net;80;25400;0;0;0;eight;2;10",
    "JUDPJITTER;1364383820;OK;n1-london.example.net;5000;200;1000;5;2;180;190;0;fast",
];

/// Join records into a newline-separated blob with a trailing newline.
pub fn blob(records: &[&str]) -> String {
    let mut out = records.join("\n");
    out.push('\n');
    out
}

/// Generate `n` throughput/latency records for throughput benchmarks and
/// bulk tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let epoch = 1_364_383_796 + i as i64;
            match i % 4 {
                0 => format!(
                    "JHTTPGET;{epoch};OK;n1-london.example.net;1;0;0;{};1;0",
                    100_000 + i
                ),
                1 => format!(
                    "JHTTPPOSTMT;{epoch};OK;n2-paris.example.net;3;0;0;{};3;0",
                    50_000 + i
                ),
                2 => format!(
                    "JUDPLATENCY;{epoch};OK;n1-london.example.net;80;{};0;0;0;{};{};10",
                    20_000 + i,
                    100 - i % 10,
                    i % 10
                ),
                _ => format!(
                    "JUDPJITTER;{epoch};OK;n2-paris.example.net;0;0;0;0;0;0;0;0;{}",
                    500 + i
                ),
            }
        })
        .collect()
}
