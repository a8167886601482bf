//! 에러 블록 추출기
//!
//! 단계 파서가 순회하는 것과 **같은** [`LineCursor`]를 받아, 현재 라인이
//! 에러 보고의 시작이면 빈 줄(제외) 또는 입력 끝까지 라인을 소비해
//! [`ErrorBlock`]으로 묶습니다. 소비된 라인은 호출자의 다음 반복에서
//! 다시 나오지 않습니다.
//!
//! # 시작 조건
//! - `"Error: "`로 시작하는 라인
//! - 정확히 `"Traceback (most recent call last):"`인 라인

use buildlog_core::types::{ErrorBlock, LogLine};

/// 일반 에러 시작 접두사
pub const ERROR_PREFIX: &str = "Error: ";

/// 파이썬 트레이스백 시작 라인
pub const TRACEBACK_LINE: &str = "Traceback (most recent call last):";

/// 라인 슬라이스 위의 전진 전용 커서
///
/// 단계 파서와 에러 추출기가 하나의 커서를 공유하여 한 번만 스캔합니다.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [LogLine],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [LogLine]) -> Self {
        Self { lines, pos: 0 }
    }

    /// 다음에 읽을 라인의 인덱스
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 아직 읽지 않은 라인
    pub fn remaining(&self) -> &'a [LogLine] {
        &self.lines[self.pos..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.lines.len().saturating_sub(self.pos);
        (n, Some(n))
    }
}

/// 라인이 에러 보고를 시작하는지 판별합니다.
pub fn opens_error_block(line: &str) -> bool {
    line.starts_with(ERROR_PREFIX) || line == TRACEBACK_LINE
}

/// 현재 라인에서 시작하는 에러 블록을 추출합니다.
///
/// `line`은 `cursor`에서 방금 꺼낸 라인이어야 합니다. 시작 조건에 맞지 않으면
/// 커서를 건드리지 않고 `None`을 반환합니다. 맞으면 빈 줄이 나오거나 커서가
/// 끝날 때까지 전진합니다. 종료 빈 줄은 소비되지만 블록에는 포함되지 않습니다.
pub fn extract_error_block(line: &str, cursor: &mut LineCursor<'_>) -> Option<ErrorBlock> {
    if !opens_error_block(line) {
        return None;
    }

    let mut collected = vec![line.to_owned()];
    for next in cursor.by_ref() {
        if next.is_empty() {
            break;
        }
        collected.push(next.to_owned());
    }

    ErrorBlock::new(collected)
}
