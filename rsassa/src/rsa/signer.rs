//! 签名/验证的入口函数
//!
//! 签名函数总是输出`required_signature_len(key)`字节; 验证函数只返回`bool`,
//! 不区分失败的原因.

use crate::rsa::pkcs1::{emsa_pkcs1_v1_5_encode_digest, emsa_pkcs1_v1_5_verify_digest};
use crate::rsa::pss::{em_len, emsa_pss_encode_digest, emsa_pss_verify_digest};
use crate::rsa::{rsasp1, rsavp1, PSSParameters, PrivateKey, PublicKey};
use crate::{HasherType, Rand, RsaError};
use log::{debug, trace};
use zeroize::Zeroizing;

/// 签名的字节长度, 即模数的字节长度k
pub fn required_signature_len(key: &PublicKey) -> usize {
    key.size()
}

/// emBits = modBits - 1
pub(crate) fn em_bits(key: &PublicKey) -> Result<usize, RsaError> {
    key.bits()
        .checked_sub(1)
        .filter(|&x| x > 0)
        .ok_or_else(|| RsaError::InvalidKey("modulus is too small".to_string()))
}

/// RSASSA-PSS-SIGN, salt由`rd`生成
pub fn sign_pss<R: Rand>(
    key: &PrivateKey,
    msg: &[u8],
    params: &PSSParameters,
    rd: &mut R,
) -> Result<Vec<u8>, RsaError> {
    let m_hash = params.hasher().digest(msg)?;
    sign_pss_digest(key, m_hash.as_slice(), params, rd)
}

/// 同`sign_pss`, 输入为`params.hasher()`计算的消息摘要
pub fn sign_pss_digest<R: Rand>(
    key: &PrivateKey,
    m_hash: &[u8],
    params: &PSSParameters,
    rd: &mut R,
) -> Result<Vec<u8>, RsaError> {
    let slen = params.sign_salt_len(em_bits(key.public_key())?)?;
    let mut salt = Zeroizing::new(vec![0u8; slen]);
    rd.rand(salt.as_mut_slice());
    sign_pss_digest_with_salt(key, m_hash, params, salt.as_slice())
}

/// 使用调用者给定的salt签名, `salt.len()`必须和`params`的salt长度一致
pub fn sign_pss_with_salt(
    key: &PrivateKey,
    msg: &[u8],
    params: &PSSParameters,
    salt: &[u8],
) -> Result<Vec<u8>, RsaError> {
    let m_hash = params.hasher().digest(msg)?;
    sign_pss_digest_with_salt(key, m_hash.as_slice(), params, salt)
}

fn sign_pss_digest_with_salt(
    key: &PrivateKey,
    m_hash: &[u8],
    params: &PSSParameters,
    salt: &[u8],
) -> Result<Vec<u8>, RsaError> {
    let em_bits = em_bits(key.public_key())?;
    let slen = params.sign_salt_len(em_bits)?;
    if salt.len() != slen {
        return Err(RsaError::EncodingError(format!(
            "pss: salt length `{}` mismatch to `{slen}`",
            salt.len()
        )));
    }

    trace!(
        "pss sign: modulus bits {}, emLen {}, hash {}, mgf1 {}, salt length {}",
        key.public_key().bits(),
        em_len(em_bits),
        params.hasher(),
        params.mgf1_hasher(),
        slen
    );

    let em = Zeroizing::new(emsa_pss_encode_digest(m_hash, em_bits, params, salt)?);
    rsasp1(key, em.as_slice())
}

/// RSASSA-PSS-VERIFY
pub fn verify_pss(key: &PublicKey, msg: &[u8], sig: &[u8], params: &PSSParameters) -> bool {
    match params.hasher().digest(msg) {
        Ok(m_hash) => verify_pss_digest(key, m_hash.as_slice(), sig, params),
        Err(e) => {
            debug!("pss verify: {e}");
            false
        }
    }
}

pub fn verify_pss_digest(
    key: &PublicKey,
    m_hash: &[u8],
    sig: &[u8],
    params: &PSSParameters,
) -> bool {
    let Ok(em_bits) = em_bits(key) else {
        return false;
    };

    let em = match rsavp1(key, sig) {
        Ok(em) => em,
        Err(e) => {
            debug!("pss verify: {e}");
            return false;
        }
    };

    // modBits - 1 是8的倍数时, em比k少一个字节, 多出的首字节必须为0
    let (lead, em) = em.split_at(em.len() - em_len(em_bits));
    if lead.iter().any(|&x| x != 0) {
        debug!("pss verify: nonzero leading byte");
        return false;
    }

    let valid = emsa_pss_verify_digest(m_hash, em, em_bits, params);
    if !valid {
        debug!(
            "pss verify: inconsistent encoding for {} with salt mode {:?}",
            params.hasher(),
            params.salt_len()
        );
    }
    valid
}

/// RSASSA-PKCS1-V1_5-SIGN
pub fn sign_pkcs1v15(
    key: &PrivateKey,
    msg: &[u8],
    hasher: HasherType,
) -> Result<Vec<u8>, RsaError> {
    let hashed = hasher.digest(msg)?;
    sign_pkcs1v15_digest(key, hashed.as_slice(), Some(hasher))
}

/// `hasher`为`None`时直接对`hashed`签名, 不添加DigestInfo前缀
pub fn sign_pkcs1v15_digest(
    key: &PrivateKey,
    hashed: &[u8],
    hasher: Option<HasherType>,
) -> Result<Vec<u8>, RsaError> {
    let k = key.public_key().size();
    trace!(
        "pkcs1 sign: modulus bits {}, emLen {}, hash {}",
        key.public_key().bits(),
        k,
        hasher.map(|h| h.to_string()).unwrap_or_else(|| "none".to_string())
    );

    let em = Zeroizing::new(emsa_pkcs1_v1_5_encode_digest(hashed, k, hasher)?);
    rsasp1(key, em.as_slice())
}

/// RSASSA-PKCS1-V1_5-VERIFY
pub fn verify_pkcs1v15(key: &PublicKey, msg: &[u8], sig: &[u8], hasher: HasherType) -> bool {
    match hasher.digest(msg) {
        Ok(hashed) => verify_pkcs1v15_digest(key, hashed.as_slice(), sig, Some(hasher)),
        Err(e) => {
            debug!("pkcs1 verify: {e}");
            false
        }
    }
}

pub fn verify_pkcs1v15_digest(
    key: &PublicKey,
    hashed: &[u8],
    sig: &[u8],
    hasher: Option<HasherType>,
) -> bool {
    let em = match rsavp1(key, sig) {
        Ok(em) => em,
        Err(e) => {
            debug!("pkcs1 verify: {e}");
            return false;
        }
    };

    let valid = emsa_pkcs1_v1_5_verify_digest(hashed, em.as_slice(), hasher);
    if !valid {
        debug!("pkcs1 verify: inconsistent encoding");
    }
    valid
}
