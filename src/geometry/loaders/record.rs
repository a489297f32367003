//! 记录分词
//!
//! 一行文本的第一个空白分隔的词是指令，其余为参数；`#` 之后为注释。
//! 字段按期望的数量和类型提取，不匹配时返回 `ParseError::Format`。

use super::line_scanner::Line;
use crate::core::error::ParseError;

/// 一条已分词的记录
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    /// 从 1 开始的行号
    pub line: usize,
    pub directive: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// 分词；空行和纯注释行返回 `None`
    pub fn parse(line: Line<'a>) -> Option<Self> {
        let content = match line.text.find('#') {
            Some(comment) => &line.text[..comment],
            None => line.text,
        };

        let mut tokens = content.split_whitespace();
        let directive = tokens.next()?;

        Some(Self {
            line: line.number,
            directive,
            args: tokens.collect(),
        })
    }

    /// 以当前记录的位置构造格式错误
    pub fn format_error(&self, origin: &str, reason: impl Into<String>) -> ParseError {
        ParseError::Format {
            origin: origin.to_string(),
            line: self.line,
            directive: self.directive.to_string(),
            reason: reason.into(),
        }
    }

    /// 要求参数数量恰好为 `expected`
    pub fn expect_args(&self, origin: &str, expected: usize) -> Result<&[&'a str], ParseError> {
        if self.args.len() != expected {
            return Err(self.format_error(
                origin,
                format!("expected {} argument(s), found {}", expected, self.args.len()),
            ));
        }
        Ok(&self.args)
    }

    /// 唯一的一个词参数（名称、路径）
    pub fn single_token(&self, origin: &str) -> Result<&'a str, ParseError> {
        Ok(self.expect_args(origin, 1)?[0])
    }

    /// 恰好 `N` 个浮点参数
    pub fn floats<const N: usize>(&self, origin: &str) -> Result<[f32; N], ParseError> {
        let args = self.expect_args(origin, N)?;
        let mut values = [0.0f32; N];
        for (value, arg) in values.iter_mut().zip(args) {
            *value = arg
                .parse()
                .map_err(|_| self.format_error(origin, format!("'{}' is not a number", arg)))?;
        }
        Ok(values)
    }
}
