//! 文本行扫描器
//!
//! 在一段不可变的文本上按 `\n` 切分记录并推进游标。
//! 扫描器不修改内容，可以随时回到开头，为计数、填充、分组三遍扫描复用同一缓冲区。
//! 超过长度上限的行被截断到上限以内；同一行无论被扫描几遍只警告一次。

/// 默认的单行长度上限（字节）
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// 扫描得到的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 从 1 开始的行号
    pub number: usize,
    /// 去掉行尾 `\r` 后的内容
    pub text: &'a str,
}

/// 可重复扫描的行序列
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    data: &'a str,
    cursor: usize,
    line_number: usize,
    max_line_length: usize,
    /// 已警告过的最大行号，回到开头时不清零
    warned_through: usize,
    truncated: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(data: &'a str, max_line_length: usize) -> Self {
        Self {
            data,
            cursor: 0,
            line_number: 0,
            max_line_length,
            warned_through: 0,
            truncated: 0,
        }
    }

    /// 回到缓冲区开头
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.line_number = 0;
    }

    /// 是否已经扫描完
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// 被截断的不同行数
    #[inline]
    pub fn truncated_lines(&self) -> usize {
        self.truncated
    }

    /// 读取下一行并推进游标
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let (line, original_length) = self.advance()?;

        if line.text.len() < original_length && line.number > self.warned_through {
            self.warned_through = line.number;
            self.truncated += 1;
            tracing::warn!(
                line = line.number,
                length = original_length,
                limit = self.max_line_length,
                "行长度超出上限，已截断"
            );
        }
        Some(line)
    }

    /// 查看下一行而不推进游标
    pub fn peek_line(&self) -> Option<Line<'a>> {
        self.clone().advance().map(|(line, _)| line)
    }

    /// 切出下一行，同时返回截断前的长度
    fn advance(&mut self) -> Option<(Line<'a>, usize)> {
        if self.is_at_end() {
            return None;
        }

        let rest = &self.data[self.cursor..];
        let (raw, advance) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.cursor += advance;
        self.line_number += 1;

        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = Line {
            number: self.line_number,
            text: self.truncate(raw),
        };
        Some((line, raw.len()))
    }

    fn truncate(&self, raw: &'a str) -> &'a str {
        if raw.len() <= self.max_line_length {
            return raw;
        }

        let mut end = self.max_line_length;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        &raw[..end]
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_numbers() {
        let mut scanner = LineScanner::new("v 1 2 3\r\n\nvn 0 0 1", DEFAULT_MAX_LINE_LENGTH);

        assert_eq!(scanner.next_line(), Some(Line { number: 1, text: "v 1 2 3" }));
        assert_eq!(scanner.next_line(), Some(Line { number: 2, text: "" }));
        assert_eq!(scanner.next_line(), Some(Line { number: 3, text: "vn 0 0 1" }));
        assert_eq!(scanner.next_line(), None);
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_rewind_rescans_same_content() {
        let mut scanner = LineScanner::new("a\nb\n", DEFAULT_MAX_LINE_LENGTH);
        let first: Vec<&str> = scanner.by_ref().map(|l| l.text).collect();

        scanner.rewind();
        let second: Vec<&str> = scanner.map(|l| l.text).collect();

        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut scanner = LineScanner::new("usemtl A\ng Hull\n", DEFAULT_MAX_LINE_LENGTH);
        scanner.next_line();

        assert_eq!(scanner.peek_line().map(|l| l.text), Some("g Hull"));
        assert_eq!(scanner.next_line().map(|l| l.number), Some(2));
    }

    #[test]
    fn test_long_line_truncated() {
        let text = format!("g {}\nv 0 0 0\n", "a".repeat(40));
        let mut scanner = LineScanner::new(&text, 16);

        let line = scanner.next_line().unwrap();
        assert_eq!(line.text.len(), 16);
        assert_eq!(scanner.next_line().map(|l| l.text), Some("v 0 0 0"));
        assert_eq!(scanner.truncated_lines(), 1);
    }

    #[test]
    fn test_truncation_counted_once_across_passes() {
        let text = format!("usemtl A\ng {}\nv 0 0 0\n", "a".repeat(40));
        let mut scanner = LineScanner::new(&text, 16);

        for _ in 0..3 {
            scanner.next_line();
            assert_eq!(scanner.peek_line().map(|l| l.text.len()), Some(16));
            assert_eq!(scanner.by_ref().count(), 2);
            scanner.rewind();
        }

        assert_eq!(scanner.truncated_lines(), 1);
    }
}
