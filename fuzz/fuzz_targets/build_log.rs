#![no_main]

use buildlog_parser::BuildLogParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let report = BuildLogParser::new().parse_str(&text);

    let summary = report.summary();
    assert_eq!(summary.total, report.len());
    assert_eq!(summary.passed + summary.failed, summary.total);
});
