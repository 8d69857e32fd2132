mod error;
pub use error::RsaError;

pub use crypto_hash::HasherType;
pub use rand::{DefaultRand, FixedRand, Rand};

pub mod rsa;

pub trait Sign {
    /// 签名追加到`sign`之后, 写入之前不清空
    fn sign(&self, msg: &[u8], sign: &mut Vec<u8>) -> Result<(), RsaError>;
}

pub trait Verify {
    /// 验证失败统一返回`RsaError::InvalidSignature`
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), RsaError>;
}

pub trait Signer: Sign + Verify {}

impl<T> Signer for T where T: Sign + Verify {}
