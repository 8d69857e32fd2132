use crypto_hash::HashError;
use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RsaError {
    /// 模数和指数之间的关系不合法
    InvalidKey(String),

    /// 模数太短, 无法容纳所选的摘要和salt
    EncodingError(String),

    /// 消息长度超过了哈希算法的输入限制
    MessageTooLong,

    /// MGF1请求的掩码长度超过$2^{32} \cdot hLen$
    MaskTooLong { mask_len: usize, limit: u128 },

    /// 消息代表值不小于模数
    MessageRepresentativeOutOfRange,

    /// 签名代表值不小于模数
    SignatureRepresentativeOutOfRange,

    /// 签名验证失败, 不区分具体原因
    InvalidSignature,

    UnsupportedDigest(String),

    KeyGeneration(String),
}

impl Display for RsaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsaError::InvalidKey(s) => f.write_fmt(format_args!("rsa: invalid key, {s}")),
            RsaError::EncodingError(s) => f.write_fmt(format_args!("rsa: encoding error, {s}")),
            RsaError::MessageTooLong => f.write_str("rsa: message too long"),
            RsaError::MaskTooLong { mask_len, limit } => f.write_fmt(format_args!(
                "mgf1: mask length `{mask_len}` exceeds the limit `{limit}`"
            )),
            RsaError::MessageRepresentativeOutOfRange => {
                f.write_str("rsa: message representative out of range")
            }
            RsaError::SignatureRepresentativeOutOfRange => {
                f.write_str("rsa: signature representative out of range")
            }
            RsaError::InvalidSignature => f.write_str("rsa: invalid signature"),
            RsaError::UnsupportedDigest(s) => {
                f.write_fmt(format_args!("rsa: unsupported digest `{s}`"))
            }
            RsaError::KeyGeneration(s) => {
                f.write_fmt(format_args!("rsa: key generation failed, {s}"))
            }
        }
    }
}

impl Error for RsaError {}

impl From<HashError> for RsaError {
    fn from(value: HashError) -> Self {
        match value {
            HashError::InputTooLong { .. } => RsaError::MessageTooLong,
            HashError::UnsupportedHasher(s) => RsaError::UnsupportedDigest(s),
            e @ HashError::MismatchingByteLen { .. } => RsaError::EncodingError(e.to_string()),
        }
    }
}
