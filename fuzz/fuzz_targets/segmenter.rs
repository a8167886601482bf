#![no_main]

use arbitrary::Arbitrary;
use buildlog_core::types::Phase;
use buildlog_parser::{LogSegmenter, PhaseClassifier};
use libfuzzer_sys::fuzz_target;

/// 마커 위주로 조합되는 로그 라인
#[derive(Arbitrary, Debug)]
enum FuzzLine {
    Boundary(String),
    BuildStart,
    NamedBuildStart(String),
    BuildEnd,
    TestStart,
    TestEnd,
    NothingToTest,
    Upload(String),
    UploadDisabled,
    Error(String),
    Traceback,
    Blank,
    Text(String),
}

impl FuzzLine {
    fn render(&self) -> String {
        match self {
            Self::Boundary(name) => format!("/tmp/staged-recipes/recipes/{name}"),
            Self::BuildStart => "BUILD START".to_owned(),
            Self::NamedBuildStart(name) => format!("BUILD START: {name}"),
            Self::BuildEnd => "BUILD END".to_owned(),
            Self::TestStart => "TEST START".to_owned(),
            Self::TestEnd => "TEST END".to_owned(),
            Self::NothingToTest => "Nothing to test for: pkg".to_owned(),
            Self::Upload(path) => format!("# $ anaconda upload {path}"),
            Self::UploadDisabled => "# $ anaconda upload".to_owned(),
            Self::Error(text) => format!("Error: {text}"),
            Self::Traceback => "Traceback (most recent call last):".to_owned(),
            Self::Blank => String::new(),
            Self::Text(text) => text.clone(),
        }
    }
}

fuzz_target!(|input: Vec<FuzzLine>| {
    let lines: Vec<String> = input.iter().map(FuzzLine::render).collect();
    let total = lines.len();
    let groups: Vec<_> = LogSegmenter::new(lines.iter()).collect();

    // 자유 텍스트도 경계가 될 수 있으므로 상한만 확인
    assert!(!groups.is_empty());
    assert!(groups.len() <= total + 1);

    let classifier = PhaseClassifier::new();
    for group in groups {
        let segments = classifier.classify(group.lines);
        let tags: Vec<Phase> = segments.iter().map(|s| s.phase).collect();
        assert_eq!(&tags[..], &Phase::ALL[..tags.len()]);
    }
});
