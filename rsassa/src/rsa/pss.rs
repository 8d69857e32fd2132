//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! === PSS(Probabilistic Signature Scheme)
//!
//! ```txt
//! em = maskedDB || H || 0xbc
//! H = Hash(M'), M' = 0x00 * 8 || Hash(msg) || salt
//! db = ps || 0x01 || salt
//! maskedDB = MGF(H, em.len - H.len - 1) ^ db
//! ```

use crate::rsa::mgf::mgf1_xor;
use crate::rsa::{signer, PrivateKey, PublicKey};
use crate::{DefaultRand, HasherType, Rand, RsaError, Sign, Verify};
use std::marker::PhantomData;
use std::ops::Range;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// salt的字节长度
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaltLength {
    /// 等于摘要长度
    #[default]
    EqualsHash,
    /// `emLen - hLen - 2`
    Max,
    /// 签名时同`Max`, 验证时从编码中恢复salt长度
    Auto,
    Fixed(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PSSParameters {
    hasher: HasherType,
    mgf1_hasher: HasherType,
    salt_len: SaltLength,
}

impl PSSParameters {
    /// MGF1默认使用和消息摘要相同的哈希算法, salt长度等于摘要长度
    pub fn new(hasher: HasherType) -> Self {
        Self {
            hasher,
            mgf1_hasher: hasher,
            salt_len: SaltLength::EqualsHash,
        }
    }

    pub fn with_mgf1_hasher(mut self, mgf1_hasher: HasherType) -> Self {
        self.mgf1_hasher = mgf1_hasher;
        self
    }

    pub fn with_salt_len(mut self, salt_len: SaltLength) -> Self {
        self.salt_len = salt_len;
        self
    }

    pub fn hasher(&self) -> HasherType {
        self.hasher
    }

    pub fn mgf1_hasher(&self) -> HasherType {
        self.mgf1_hasher
    }

    pub fn salt_len(&self) -> SaltLength {
        self.salt_len
    }

    /// 签名时使用的salt字节长度, 同时检查`emLen >= hLen + sLen + 2`
    pub fn sign_salt_len(&self, em_bits: usize) -> Result<usize, RsaError> {
        let (em_len, h_len) = (em_len(em_bits), self.hasher.digest_len());
        let too_short = || {
            RsaError::EncodingError(format!(
                "pss: {em_bits}-bits encoded message is too short for {} and the salt",
                self.hasher
            ))
        };

        let slen = match self.salt_len {
            SaltLength::EqualsHash => h_len,
            SaltLength::Max | SaltLength::Auto => {
                em_len.checked_sub(h_len + 2).ok_or_else(too_short)?
            }
            SaltLength::Fixed(x) => x,
        };

        if em_len < h_len + slen + 2 {
            return Err(too_short());
        }

        Ok(slen)
    }
}

/// 编码消息的字节长度
pub(crate) fn em_len(em_bits: usize) -> usize {
    (em_bits + 7) >> 3
}

// (db_idx, hash_idx)
fn idx_bound(em_len: usize, h_len: usize) -> (Range<usize>, Range<usize>) {
    // em = maskedDB || H || 0xbc
    (
        Range {
            start: 0,
            end: em_len - h_len - 1,
        },
        Range {
            start: em_len - h_len - 1,
            end: em_len - 1,
        },
    )
}

// H = Hash(0x00 * 8 || m_hash || salt)
fn hash_prime(hasher: HasherType, m_hash: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut h = hasher.build();
    h.write_x([0u8; 8].as_slice());
    h.write_x(m_hash);
    h.write_x(salt);
    h.finish_x()
}

/// EMSA-PSS-ENCODE, `salt.len()`即sLen, 输出`ceil(em_bits/8)`字节
pub fn emsa_pss_encode(
    msg: &[u8],
    em_bits: usize,
    params: &PSSParameters,
    salt: &[u8],
) -> Result<Vec<u8>, RsaError> {
    let m_hash = params.hasher.digest(msg)?;
    emsa_pss_encode_digest(m_hash.as_slice(), em_bits, params, salt)
}

/// 同`emsa_pss_encode`, 输入为消息摘要
pub fn emsa_pss_encode_digest(
    m_hash: &[u8],
    em_bits: usize,
    params: &PSSParameters,
    salt: &[u8],
) -> Result<Vec<u8>, RsaError> {
    let (em_len, h_len, slen) = (em_len(em_bits), params.hasher.digest_len(), salt.len());
    if m_hash.len() != h_len {
        return Err(RsaError::EncodingError(format!(
            "pss: digest length `{}` mismatch to {}",
            m_hash.len(),
            params.hasher
        )));
    }

    if em_len < h_len + slen + 2 {
        return Err(RsaError::EncodingError(format!(
            "pss: {em_bits}-bits encoded message is too short for {} and {slen}-bytes salt",
            params.hasher
        )));
    }

    let mut em = vec![0u8; em_len];
    let (db_idx, h_idx) = idx_bound(em_len, h_len);
    em[h_idx.clone()].copy_from_slice(hash_prime(params.hasher, m_hash, salt).as_slice());
    em[h_idx.end] = 0xbc;

    // db = ps || 0x01 || salt
    em[db_idx.end - slen - 1] = 0x01;
    em[(db_idx.end - slen)..db_idx.end].copy_from_slice(salt);
    let (db, h) = em.split_at_mut(db_idx.end);
    mgf1_xor(db, &h[..h_len], params.mgf1_hasher)?;
    em[0] &= 0xffu8 >> ((em_len << 3) - em_bits);

    Ok(em)
}

/// EMSA-PSS-VERIFY, 所有的失败原因都返回`false`
pub fn emsa_pss_verify(msg: &[u8], em: &[u8], em_bits: usize, params: &PSSParameters) -> bool {
    match params.hasher.digest(msg) {
        Ok(m_hash) => emsa_pss_verify_digest(m_hash.as_slice(), em, em_bits, params),
        Err(_) => false,
    }
}

/// 同`emsa_pss_verify`, 输入为消息摘要
pub fn emsa_pss_verify_digest(
    m_hash: &[u8],
    em: &[u8],
    em_bits: usize,
    params: &PSSParameters,
) -> bool {
    let (em_len, h_len) = (em_len(em_bits), params.hasher.digest_len());
    if m_hash.len() != h_len || em.len() != em_len || em_len < h_len + 2 {
        return false;
    }

    let unused = (em_len << 3) - em_bits;
    let (db_idx, h_idx) = idx_bound(em_len, h_len);
    let mut valid = em[h_idx.end].ct_eq(&0xbc);
    valid &= (em[0] & !(0xffu8 >> unused)).ct_eq(&0);

    let mut db = Zeroizing::new(em[db_idx.clone()].to_vec());
    if mgf1_xor(db.as_mut_slice(), &em[h_idx.clone()], params.mgf1_hasher).is_err() {
        return false;
    }
    db[0] &= 0xffu8 >> unused;

    let slen = match params.salt_len {
        SaltLength::EqualsHash => h_len,
        SaltLength::Max => em_len - h_len - 2,
        SaltLength::Fixed(x) => x,
        // db = 0x00 ... 0x00 || 0x01 || salt
        SaltLength::Auto => match db.iter().position(|&x| x != 0) {
            Some(i) => db.len() - i - 1,
            None => return false,
        },
    };

    if db.len() < slen + 1 {
        return false;
    }

    let ps_len = db.len() - slen - 1;
    let ps = db[..ps_len].iter().fold(0u8, |acc, &x| acc | x);
    valid &= ps.ct_eq(&0);
    valid &= db[ps_len].ct_eq(&0x01);

    let h = hash_prime(params.hasher, m_hash, &db[(ps_len + 1)..]);
    valid &= h.as_slice().ct_eq(&em[h_idx]);

    bool::from(valid)
}

#[derive(Clone, Debug)]
pub struct PSSVerify {
    key: PublicKey,
    params: PSSParameters,
}

/// 每次签名时通过`R::default()`得到新的随机数生成器, 因此可以在线程间共享.
#[derive(Clone, Debug)]
pub struct PSSSign<R: Rand + Default = DefaultRand> {
    key: PrivateKey,
    pss: PSSVerify,
    rd: PhantomData<fn() -> R>,
}

impl AsRef<PublicKey> for PSSVerify {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl<R: Rand + Default> AsRef<PSSVerify> for PSSSign<R> {
    fn as_ref(&self) -> &PSSVerify {
        &self.pss
    }
}

impl<R: Rand + Default> AsRef<PrivateKey> for PSSSign<R> {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

impl<R: Rand + Default> From<PSSSign<R>> for PSSVerify {
    fn from(value: PSSSign<R>) -> Self {
        value.pss
    }
}

impl PSSVerify {
    pub fn new(key: PublicKey, params: PSSParameters) -> Result<Self, RsaError> {
        key.is_valid()?;
        let em_bits = signer::em_bits(&key)?;
        if em_len(em_bits) < params.hasher.digest_len() + 2 {
            return Err(RsaError::EncodingError(format!(
                "pss: the public key is too short for {}",
                params.hasher
            )));
        }

        Ok(Self { key, params })
    }

    pub fn params(&self) -> &PSSParameters {
        &self.params
    }
}

impl<R: Rand + Default> PSSSign<R> {
    pub fn new(key: PrivateKey, params: PSSParameters) -> Result<Self, RsaError> {
        key.is_valid()?;
        Self::new_uncheck(key, params)
    }

    /// 不检查私钥的合法性
    pub fn new_uncheck(key: PrivateKey, params: PSSParameters) -> Result<Self, RsaError> {
        let pss = PSSVerify::new(key.public_key().clone(), params)?;
        params.sign_salt_len(signer::em_bits(key.public_key())?)?;
        Ok(Self {
            key,
            pss,
            rd: PhantomData,
        })
    }

    pub fn params(&self) -> &PSSParameters {
        self.pss.params()
    }
}

impl Verify for PSSVerify {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), RsaError> {
        if signer::verify_pss(&self.key, msg, sign, &self.params) {
            Ok(())
        } else {
            Err(RsaError::InvalidSignature)
        }
    }
}

impl<R: Rand + Default> Verify for PSSSign<R> {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), RsaError> {
        self.pss.verify(msg, sign)
    }
}

impl<R: Rand + Default> Sign for PSSSign<R> {
    fn sign(&self, msg: &[u8], sign: &mut Vec<u8>) -> Result<(), RsaError> {
        let mut rd = R::default();
        let s = signer::sign_pss(&self.key, msg, &self.pss.params, &mut rd)?;
        sign.extend_from_slice(s.as_slice());
        Ok(())
    }
}
