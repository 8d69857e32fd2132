//! RFC 8017 9.2 Note 1: DER编码的DigestInfo前缀
//!
//! DigestInfo ::= SEQUENCE {
//!     digestAlgorithm AlgorithmIdentifier,
//!     digest OCTET STRING
//! }
//!
//! 对固定的哈希算法, DigestInfo除摘要外的部分是常量, 直接拼接在摘要之前即可.

use crate::{HashError, HasherType};

const SHA1_PREFIX: [u8; 15] = [
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];

// SEQUENCE { SEQUENCE { OID 2.16.840.1.101.3.4.2.x, NULL }, OCTET STRING(hlen) }
macro_rules! sha2_prefix {
    ($LEN: literal, $ID: literal, $HLEN: literal) => {
        [
            0x30, $LEN, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            $ID, 0x05, 0x00, 0x04, $HLEN,
        ]
    };
}

const SHA224_PREFIX: [u8; 19] = sha2_prefix!(0x2d, 0x04, 0x1c);
const SHA256_PREFIX: [u8; 19] = sha2_prefix!(0x31, 0x01, 0x20);
const SHA384_PREFIX: [u8; 19] = sha2_prefix!(0x41, 0x02, 0x30);
const SHA512_PREFIX: [u8; 19] = sha2_prefix!(0x51, 0x03, 0x40);
const SHA512_224_PREFIX: [u8; 19] = sha2_prefix!(0x2d, 0x05, 0x1c);
const SHA512_256_PREFIX: [u8; 19] = sha2_prefix!(0x31, 0x06, 0x20);

impl HasherType {
    /// DigestInfo中摘要值之前的DER编码
    pub fn digest_info_prefix(self) -> &'static [u8] {
        match self {
            HasherType::SHA1 => &SHA1_PREFIX,
            HasherType::SHA2_224 => &SHA224_PREFIX,
            HasherType::SHA2_256 => &SHA256_PREFIX,
            HasherType::SHA2_384 => &SHA384_PREFIX,
            HasherType::SHA2_512 => &SHA512_PREFIX,
            HasherType::SHA2_512T224 => &SHA512_224_PREFIX,
            HasherType::SHA2_512T256 => &SHA512_256_PREFIX,
        }
    }

    /// DER编码的DigestInfo, `hashed`必须是该算法的摘要长度
    pub fn digest_info(self, hashed: &[u8]) -> Result<Vec<u8>, HashError> {
        if hashed.len() != self.digest_len() {
            return Err(HashError::MismatchingByteLen {
                target: self.digest_len(),
                real: hashed.len(),
            });
        }

        let prefix = self.digest_info_prefix();
        let mut t = Vec::with_capacity(prefix.len() + hashed.len());
        t.extend_from_slice(prefix);
        t.extend_from_slice(hashed);
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use crate::{HashError, HasherType};

    #[test]
    fn prefix_der_lengths() {
        for &h in HasherType::all() {
            let prefix = h.digest_info_prefix();
            let hlen = h.digest_len();
            // 外层SEQUENCE的长度覆盖其后全部内容
            assert_eq!(prefix[1] as usize + 2, prefix.len() + hlen, "{h}");
            // OCTET STRING的长度等于摘要长度
            assert_eq!(prefix[prefix.len() - 2], 0x04, "{h}");
            assert_eq!(prefix[prefix.len() - 1] as usize, hlen, "{h}");
        }
    }

    #[test]
    fn sha256_digest_info() {
        let d = HasherType::SHA2_256.digest(b"abc").unwrap();
        let t = HasherType::SHA2_256.digest_info(&d).unwrap();
        assert_eq!(t.len(), 51);
        assert_eq!(&t[..19], HasherType::SHA2_256.digest_info_prefix());
        assert_eq!(&t[19..], d.as_slice());

        assert_eq!(
            HasherType::SHA2_384.digest_info(&d),
            Err(HashError::MismatchingByteLen {
                target: 48,
                real: 32
            })
        );
    }
}
