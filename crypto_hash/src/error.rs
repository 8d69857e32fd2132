use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashError {
    /// 实际字节长度`real`和目标字节长度`target`不匹配
    MismatchingByteLen { target: usize, real: usize },

    /// 不支持的哈希算法
    UnsupportedHasher(String),

    /// 消息长度超过了哈希算法能处理的最大字节长度
    InputTooLong { limit: u128 },
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::MismatchingByteLen { target, real } => f.write_fmt(format_args!(
                "real byte length `{real}` not match to target byte length `{target}`"
            )),
            HashError::UnsupportedHasher(s) => {
                f.write_fmt(format_args!("unsupported hash algorithm `{s}`"))
            }
            HashError::InputTooLong { limit } => f.write_fmt(format_args!(
                "the message is longer than the hash input limit `{limit}` bytes"
            )),
        }
    }
}

impl Error for HashError {}
