//! 数据转换原语(I2OSP/OS2IP)和签名原语(RSASP1/RSAVP1)
use crate::rsa::{PrivateKey, PublicKey};
use crate::RsaError;
use num_bigint::BigUint;

/// I2OSP: 非负整数转换为`len`字节的大端字节串
pub fn i2osp(x: &BigUint, len: usize) -> Result<Vec<u8>, RsaError> {
    let bytes = x.to_bytes_be();
    // 0的to_bytes_be为[0]
    let bytes = if bytes.iter().all(|&b| b == 0) {
        &[][..]
    } else {
        bytes.as_slice()
    };

    if bytes.len() > len {
        return Err(RsaError::EncodingError(format!(
            "integer too large to fit in {len} bytes"
        )));
    }

    let mut out = vec![0u8; len];
    out[(len - bytes.len())..].copy_from_slice(bytes);
    Ok(out)
}

/// OS2IP: 大端字节串转换为非负整数
pub fn os2ip(x: &[u8]) -> BigUint {
    BigUint::from_bytes_be(x)
}

/// RSASP1: 对编码后的消息`em`做私钥运算, 输出k字节的签名.
///
/// 使用CRT时会用公钥复核结果, 防止故障注入泄露素因子.
pub fn rsasp1(key: &PrivateKey, em: &[u8]) -> Result<Vec<u8>, RsaError> {
    let pk = key.public_key();
    let m = os2ip(em);
    if &m >= pk.modulus() {
        return Err(RsaError::MessageRepresentativeOutOfRange);
    }

    let s = key.raw_private(&m);
    if key.is_crt() && pk.raw_public(&s) != m {
        return Err(RsaError::InvalidKey(
            "rsasp1: signature self-check failed".to_string(),
        ));
    }

    i2osp(&s, pk.size())
}

/// RSAVP1: 对k字节的签名做公钥运算, 输出k字节的消息代表.
pub fn rsavp1(key: &PublicKey, sig: &[u8]) -> Result<Vec<u8>, RsaError> {
    if sig.len() != key.size() {
        return Err(RsaError::InvalidSignature);
    }

    let s = os2ip(sig);
    if &s >= key.modulus() {
        return Err(RsaError::SignatureRepresentativeOutOfRange);
    }

    i2osp(&key.raw_public(&s), key.size())
}
