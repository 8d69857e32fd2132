//! = RFC 8017
//!
//! == PKCS #1: RSA Cryptography Specification Version 2.2
//!
//! 只实现签名方案: RSASSA-PSS和RSASSA-PKCS1-v1_5.
//!
//! ```txt
//! sign:   msg -> EMSA-encode -> OS2IP -> RSASP1 -> I2OSP(k) -> signature
//! verify: signature -> OS2IP -> RSAVP1 -> I2OSP(k) -> EMSA-verify(msg)
//! ```
//!
//! 签名的长度总是等于模数的字节长度k.

mod key;
pub use key::{PrivateKey, PublicKey, MIN_KEY_BITS, PUBLIC_EXPONENT};

mod primitive;
pub use primitive::{i2osp, os2ip, rsasp1, rsavp1};

mod mgf;
pub use mgf::{mgf1, mgf1_xor};

mod pss;
pub use pss::{
    emsa_pss_encode, emsa_pss_encode_digest, emsa_pss_verify, emsa_pss_verify_digest,
    PSSParameters, PSSSign, PSSVerify, SaltLength,
};

mod pkcs1;
pub use pkcs1::{
    emsa_pkcs1_v1_5_encode, emsa_pkcs1_v1_5_encode_digest, emsa_pkcs1_v1_5_verify,
    emsa_pkcs1_v1_5_verify_digest, PKCS1Sign, PKCS1Verify,
};

mod signer;
pub use signer::{
    required_signature_len, sign_pkcs1v15, sign_pkcs1v15_digest, sign_pss, sign_pss_digest,
    sign_pss_with_salt, verify_pkcs1v15, verify_pkcs1v15_digest, verify_pss, verify_pss_digest,
};

#[cfg(test)]
mod testdata;
