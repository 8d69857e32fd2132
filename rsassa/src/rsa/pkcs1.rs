//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! === RSASSA-PKCS1-v1_5
//!
//! ```txt
//! em = 0x00 || 0x01 || ps || 0x00 || T
//! T = DigestInfo(Hash(msg))
//! ps = 0xff * (emLen - tLen - 3), ps.len >= 8
//! ```

use crate::rsa::{signer, PrivateKey, PublicKey};
use crate::{HasherType, RsaError, Sign, Verify};
use subtle::ConstantTimeEq;

/// 填充`ps`的最小长度
const MIN_PS_LEN: usize = 8;

/// EMSA-PKCS1-v1_5-ENCODE, 输出`em_len`字节
pub fn emsa_pkcs1_v1_5_encode(
    msg: &[u8],
    em_len: usize,
    hasher: HasherType,
) -> Result<Vec<u8>, RsaError> {
    let hashed = hasher.digest(msg)?;
    emsa_pkcs1_v1_5_encode_digest(hashed.as_slice(), em_len, Some(hasher))
}

/// `hasher`为`None`时`hashed`直接作为T, 不添加DigestInfo前缀
pub fn emsa_pkcs1_v1_5_encode_digest(
    hashed: &[u8],
    em_len: usize,
    hasher: Option<HasherType>,
) -> Result<Vec<u8>, RsaError> {
    let t = match hasher {
        Some(h) => h
            .digest_info(hashed)
            .map_err(|e| RsaError::EncodingError(e.to_string()))?,
        None => hashed.to_vec(),
    };

    if em_len < t.len() + MIN_PS_LEN + 3 {
        return Err(RsaError::EncodingError(format!(
            "pkcs1: intended encoded message length `{em_len}` too short for `{}` bytes digest info",
            t.len()
        )));
    }

    let mut em = vec![0xffu8; em_len];
    em[0] = 0x00;
    em[1] = 0x01;
    em[em_len - t.len() - 1] = 0x00;
    em[(em_len - t.len())..].copy_from_slice(t.as_slice());
    Ok(em)
}

/// 重新编码后与`em`做常量时间比较
pub fn emsa_pkcs1_v1_5_verify(msg: &[u8], em: &[u8], hasher: HasherType) -> bool {
    match hasher.digest(msg) {
        Ok(hashed) => emsa_pkcs1_v1_5_verify_digest(hashed.as_slice(), em, Some(hasher)),
        Err(_) => false,
    }
}

pub fn emsa_pkcs1_v1_5_verify_digest(hashed: &[u8], em: &[u8], hasher: Option<HasherType>) -> bool {
    match emsa_pkcs1_v1_5_encode_digest(hashed, em.len(), hasher) {
        Ok(expected) => expected.as_slice().ct_eq(em).into(),
        Err(_) => false,
    }
}

#[derive(Clone, Debug)]
pub struct PKCS1Verify {
    key: PublicKey,
    hasher: HasherType,
}

#[derive(Clone, Debug)]
pub struct PKCS1Sign {
    key: PrivateKey,
    pkcs: PKCS1Verify,
}

impl AsRef<PublicKey> for PKCS1Verify {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl AsRef<PKCS1Verify> for PKCS1Sign {
    fn as_ref(&self) -> &PKCS1Verify {
        &self.pkcs
    }
}

impl AsRef<PrivateKey> for PKCS1Sign {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

impl From<PKCS1Sign> for PKCS1Verify {
    fn from(value: PKCS1Sign) -> Self {
        value.pkcs
    }
}

impl PKCS1Verify {
    pub fn new(key: PublicKey, hasher: HasherType) -> Result<Self, RsaError> {
        key.is_valid()?;
        let t_len = hasher.digest_info_prefix().len() + hasher.digest_len();
        if key.size() < t_len + MIN_PS_LEN + 3 {
            return Err(RsaError::EncodingError(format!(
                "pkcs1: the public key is too short for {hasher}"
            )));
        }

        Ok(Self { key, hasher })
    }

    pub fn hasher(&self) -> HasherType {
        self.hasher
    }
}

impl PKCS1Sign {
    pub fn new(key: PrivateKey, hasher: HasherType) -> Result<Self, RsaError> {
        key.is_valid()?;
        Self::new_uncheck(key, hasher)
    }

    /// 不检查私钥的合法性
    pub fn new_uncheck(key: PrivateKey, hasher: HasherType) -> Result<Self, RsaError> {
        let pkcs = PKCS1Verify::new(key.public_key().clone(), hasher)?;
        Ok(Self { key, pkcs })
    }

    pub fn hasher(&self) -> HasherType {
        self.pkcs.hasher
    }
}

impl Verify for PKCS1Verify {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), RsaError> {
        if signer::verify_pkcs1v15(&self.key, msg, sign, self.hasher) {
            Ok(())
        } else {
            Err(RsaError::InvalidSignature)
        }
    }
}

impl Verify for PKCS1Sign {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), RsaError> {
        self.pkcs.verify(msg, sign)
    }
}

impl Sign for PKCS1Sign {
    fn sign(&self, msg: &[u8], sign: &mut Vec<u8>) -> Result<(), RsaError> {
        let s = signer::sign_pkcs1v15(&self.key, msg, self.pkcs.hasher)?;
        sign.extend_from_slice(s.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        emsa_pkcs1_v1_5_encode, emsa_pkcs1_v1_5_encode_digest, emsa_pkcs1_v1_5_verify,
        PKCS1Sign, PKCS1Verify,
    };
    use crate::rsa::testdata;
    use crate::{HasherType, RsaError, Sign, Verify};

    #[test]
    fn emsa_pkcs1_layout() {
        let em = emsa_pkcs1_v1_5_encode(b"abc", 64, HasherType::SHA2_256).unwrap();
        let prefix = HasherType::SHA2_256.digest_info_prefix();
        // 00 01 ff*10 00 || prefix(19) || digest(32)
        assert_eq!(&em[..2], &[0x00, 0x01]);
        assert!(em[2..12].iter().all(|&x| x == 0xff));
        assert_eq!(em[12], 0x00);
        assert_eq!(&em[13..32], prefix);
        assert_eq!(
            &em[32..],
            HasherType::SHA2_256.digest(b"abc").unwrap().as_slice()
        );

        assert!(emsa_pkcs1_v1_5_verify(b"abc", &em, HasherType::SHA2_256));
        assert!(!emsa_pkcs1_v1_5_verify(b"abd", &em, HasherType::SHA2_256));
        assert!(!emsa_pkcs1_v1_5_verify(b"abc", &em, HasherType::SHA2_512T256));
    }

    #[test]
    fn emsa_pkcs1_too_short() {
        // SHA-384: tLen = 19 + 48 = 67
        assert!(matches!(
            emsa_pkcs1_v1_5_encode(b"abc", 64, HasherType::SHA2_384),
            Err(RsaError::EncodingError(_))
        ));
        assert!(emsa_pkcs1_v1_5_encode(b"abc", 78, HasherType::SHA2_384).is_ok());
        assert!(emsa_pkcs1_v1_5_encode(b"abc", 77, HasherType::SHA2_384).is_err());

        // 摘要长度不对
        assert!(matches!(
            emsa_pkcs1_v1_5_encode_digest(&[0u8; 20], 64, Some(HasherType::SHA2_256)),
            Err(RsaError::EncodingError(_))
        ));
    }

    #[test]
    fn emsa_pkcs1_raw_digest() {
        let em = emsa_pkcs1_v1_5_encode_digest(&[0xabu8; 36], 64, None).unwrap();
        assert_eq!(em[64 - 37], 0x00);
        assert!(em[2..(64 - 37)].iter().all(|&x| x == 0xff));
        assert!(em[(64 - 36)..].iter().all(|&x| x == 0xab));
    }

    #[test]
    fn pkcs1_sign_verify() {
        let key = testdata::key_512();
        let pkcs = PKCS1Sign::new(key.clone(), HasherType::SHA1).unwrap();
        let mut sig = vec![0xaau8];
        pkcs.sign(b"Test.\n", &mut sig).unwrap();
        // 签名追加在原有内容之后
        assert_eq!(sig.len(), 65);
        assert_eq!(sig[0], 0xaa);
        pkcs.verify(b"Test.\n", &sig[1..]).unwrap();
        assert_eq!(
            pkcs.verify(b"Test!\n", &sig[1..]),
            Err(RsaError::InvalidSignature)
        );

        assert!(matches!(
            PKCS1Verify::new(key.public_key().clone(), HasherType::SHA2_512),
            Err(RsaError::EncodingError(_))
        ));
        let v: PKCS1Verify = pkcs.into();
        assert_eq!(v.hasher(), HasherType::SHA1);
    }
}
