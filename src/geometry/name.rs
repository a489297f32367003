//! 定长名称
//!
//! 网格名、材质名和纹理路径在下游二进制格式中占用 128 字节的定长字段
//! （含结尾的 NUL），因此内容最多 127 字节。超长输入在不超过上限的最后一个
//! UTF-8 字符边界处截断，并记录一条警告。

use std::fmt;

/// 名称内容的最大字节数
pub const MAX_NAME_LENGTH: usize = 127;

/// 有长度上限的名称字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedName(String);

impl BoundedName {
    /// 创建名称，超长时截断
    pub fn new(name: &str) -> Self {
        if name.len() <= MAX_NAME_LENGTH {
            return Self(name.to_string());
        }

        let mut end = MAX_NAME_LENGTH;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        tracing::warn!(
            name = %name,
            limit = MAX_NAME_LENGTH,
            "名称超出长度上限，已截断"
        );
        Self(name[..end].to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BoundedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoundedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for BoundedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BoundedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BoundedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
