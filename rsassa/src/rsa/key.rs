//! RSA公钥/私钥, 以及密钥生成
use crate::{Rand, RsaError};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use utils::BigUintExt;

/// 密钥生成固定使用的公钥指数
pub const PUBLIC_EXPONENT: u32 = 65537;

/// 密钥生成允许的最小模数位长
pub const MIN_KEY_BITS: usize = 512;

#[derive(Clone, Debug, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // gcd(e, lambda(n)) = 1
    e: BigUint,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PrivateKey {
    pk: PublicKey,
    // d * e = 1 % lambda(n)
    d: BigUint,
    factor: Option<PrimeFactor>,
}

#[derive(Clone, Serialize, Deserialize)]
struct PrimeFactor {
    p: BigUint,
    q: BigUint,
    // d % (p - 1)
    d_p: BigUint,
    // d % (q - 1)
    d_q: BigUint,
    // q^{-1} % p
    q_inv: BigUint,
}

impl PublicKey {
    /// 校验`n`和`e`: `n`为奇数, `e`为奇数且`1 < e < n`
    pub fn new(n: BigUint, e: BigUint) -> Result<Self, RsaError> {
        let pk = Self::new_uncheck(n, e);
        pk.is_valid()?;
        Ok(pk)
    }

    /// note: not to check the `n` and `e` are right RSA parameters
    pub fn new_uncheck(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    pub fn from_be_bytes(n: &[u8], e: &[u8]) -> Result<Self, RsaError> {
        Self::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// 模数的位长
    pub fn bits(&self) -> usize {
        self.n.bits() as usize
    }

    /// 模数的字节长度k, 也是签名的字节长度
    pub fn size(&self) -> usize {
        (self.bits() + 7) >> 3
    }

    pub fn is_valid(&self) -> Result<(), RsaError> {
        if self.n.is_even() || self.n <= BigUint::from(3u8) {
            Err(RsaError::InvalidKey(format!(
                "modulus {:#x} must be an odd number great than 3",
                self.n
            )))
        } else if self.e <= BigUint::one() || self.e >= self.n {
            Err(RsaError::InvalidKey(format!(
                "public exponent {:#x} out of range (1, n)",
                self.e
            )))
        } else if self.e.is_even() {
            Err(RsaError::InvalidKey(format!(
                "public exponent {:#x} must be odd",
                self.e
            )))
        } else {
            Ok(())
        }
    }

    /// $s^e \mod n$, 调用者保证$s \lt n$
    pub(crate) fn raw_public(&self, s: &BigUint) -> BigUint {
        s.modpow(&self.e, &self.n)
    }
}

impl PrivateKey {
    /// note: 不做任何校验, 且不使用CRT加速
    pub fn new_uncheck(n: BigUint, e: BigUint, d: BigUint) -> Self {
        Self {
            pk: PublicKey::new_uncheck(n, e),
            d,
            factor: None,
        }
    }

    /// 不带素因子的私钥, 只能做$m^d \mod n$
    pub fn new(n: BigUint, e: BigUint, d: BigUint) -> Result<Self, RsaError> {
        let key = Self::new_uncheck(n, e, d);
        key.is_valid()?;
        Ok(key)
    }

    /// 由`(n, e, d, p, q)`构造私钥, 并预计算CRT参数
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, RsaError> {
        if p <= BigUint::one() || q <= BigUint::one() {
            return Err(RsaError::InvalidKey("invalid prime value".to_string()));
        }

        let q_inv = BigUintExt(&q)
            .modinv(&p)
            .ok_or_else(|| RsaError::InvalidKey("`q` is not invertible modulo `p`".to_string()))?;
        let factor = PrimeFactor {
            d_p: &d % (&p - 1u32),
            d_q: &d % (&q - 1u32),
            p,
            q,
            q_inv,
        };

        let key = Self {
            pk: PublicKey::new_uncheck(n, e),
            d,
            factor: Some(factor),
        };
        key.is_valid()?;
        Ok(key)
    }

    /// 由两个素数和公钥指数导出私钥, $d = e^{-1} \mod lcm(p-1, q-1)$
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, RsaError> {
        if p == q {
            return Err(RsaError::InvalidKey("`p` must not equal to `q`".to_string()));
        }

        let n = &p * &q;
        let lambda = (&p - 1u32).lcm(&(&q - 1u32));
        let d = BigUintExt(&e).modinv(&lambda).ok_or_else(|| {
            RsaError::InvalidKey(format!("public exponent {:#x} is not invertible", e))
        })?;

        Self::from_components(n, e, d, p, q)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// 素因子`(p, q)`, 由`new`/`new_uncheck`构造的私钥没有素因子
    pub fn primes(&self) -> Option<(&BigUint, &BigUint)> {
        self.factor.as_ref().map(|f| (&f.p, &f.q))
    }

    pub(crate) fn is_crt(&self) -> bool {
        self.factor.is_some()
    }

    // m1 = c^{dp} % p, m2 = c^{dq} % q
    // h = (m1 - m2) * qinv % p
    // m = m2 + q * h
    pub(crate) fn raw_private(&self, c: &BigUint) -> BigUint {
        match self.factor.as_ref() {
            Some(f) => {
                let m1 = c.modpow(&f.d_p, &f.p);
                let m2 = c.modpow(&f.d_q, &f.q);
                // m1 - m2 可能为负, 先加上p
                let diff = (m1 + &f.p - (&m2 % &f.p)) % &f.p;
                let h = (diff * &f.q_inv) % &f.p;
                m2 + h * &f.q
            }
            None => c.modpow(&self.d, &self.pk.n),
        }
    }

    pub fn is_valid(&self) -> Result<(), RsaError> {
        self.pk.is_valid()?;

        if self.d.is_zero() || self.d >= self.pk.n {
            return Err(RsaError::InvalidKey(
                "private exponent out of range (0, n)".to_string(),
            ));
        }

        match self.factor.as_ref() {
            Some(f) => {
                // 反序列化得到的素因子未经过`from_components`检查
                if f.p <= BigUint::one() || f.q <= BigUint::one() {
                    return Err(RsaError::InvalidKey("invalid prime value".to_string()));
                }

                if &f.p * &f.q != self.pk.n {
                    return Err(RsaError::InvalidKey("p * q != n".to_string()));
                }

                let de = &self.d * &self.pk.e;
                for prime in [&f.p, &f.q] {
                    if !(&de % (prime - 1u32)).is_one() {
                        return Err(RsaError::InvalidKey(
                            "e * d != 1 mod (prime - 1)".to_string(),
                        ));
                    }
                }
            }
            None => {
                // 没有素因子时只能抽查: (2^d)^e == 2 mod n
                let two = BigUint::from(2u8);
                if self.pk.raw_public(&self.raw_private(&two)) != two {
                    return Err(RsaError::InvalidKey(
                        "private exponent mismatch to public exponent".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// 生成`bits_len`位的两素数RSA私钥, 公钥指数固定为65537.
    ///
    /// `prime_test_rounds`(n) means the number of test rounds, for any odd number that great than 2 and positive integer n, the probability of error
    /// in MillerRabinPrimeTest is at most $2^{-n}$.
    pub fn generate_key<R: Rand>(
        bits_len: usize,
        prime_test_rounds: usize,
        rd: &mut R,
    ) -> Result<PrivateKey, RsaError> {
        if bits_len < MIN_KEY_BITS || bits_len & 1 == 1 {
            return Err(RsaError::KeyGeneration(format!(
                "invalid modulus bits `{}`, need an even number not less than {}",
                bits_len, MIN_KEY_BITS
            )));
        }

        let e = BigUint::from(PUBLIC_EXPONENT);
        loop {
            let p = BigUintExt::<BigUint>::generate_prime(bits_len >> 1, prime_test_rounds, rd)
                .map_err(RsaError::KeyGeneration)?;
            let q = BigUintExt::<BigUint>::generate_prime(bits_len >> 1, prime_test_rounds, rd)
                .map_err(RsaError::KeyGeneration)?;

            if p == q {
                continue;
            }

            // 每个素数最高两位都为1, 乘积一定是bits_len位
            if (&p * &q).bits() as usize != bits_len {
                continue;
            }

            // gcd(e, p-1) != 1 或 gcd(e, q-1) != 1 时重新生成
            let Ok(key) = Self::from_primes(p, q, e.clone()) else {
                continue;
            };

            // FIPS 186-4: d > 2^{nlen/2}
            if (key.d.bits() as usize) <= (bits_len >> 1) {
                continue;
            }

            log::trace!("rsa: generated {}-bits key", bits_len);
            break Ok(key);
        }
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pk", &self.pk)
            .field("crt", &self.factor.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{PrivateKey, PublicKey};
    use crate::rsa::testdata;
    use crate::{DefaultRand, RsaError};
    use num_bigint::BigUint;
    use num_traits::{Num, One};

    fn dec(s: &str) -> BigUint {
        BigUint::from_str_radix(s, 10).unwrap()
    }

    fn key_basics(key: &PrivateKey) {
        key.is_valid().unwrap();
        let m = BigUint::from(42u32);
        let c = key.public_key().raw_public(&m);
        assert_eq!(m, key.raw_private(&c));
    }

    #[test]
    fn rsa_keygen_1024() {
        let mut rng = DefaultRand::default();
        let key = PrivateKey::generate_key(1024, 19, &mut rng).unwrap();
        assert_eq!(key.public_key().bits(), 1024);
        assert_eq!(key.public_key().size(), 128);
        assert_eq!(key.public_key().exponent(), &BigUint::from(65537u32));
        key_basics(&key);
    }

    #[test]
    fn rsa_keygen_invalid_bits() {
        let mut rng = DefaultRand::default();
        for bits in [0, 256, 511, 1025] {
            assert!(matches!(
                PrivateKey::generate_key(bits, 19, &mut rng),
                Err(RsaError::KeyGeneration(_))
            ));
        }
    }

    #[test]
    fn gnu_tls_key() {
        let n = dec("290684273230919398108010081414538931343");
        let e = BigUint::from(65537u32);
        let d = dec("31877380284581499213530787347443987241");
        let (p, q) = (dec("16775196964030542637"), dec("17328218193455850539"));

        let key = PrivateKey::from_components(n.clone(), e.clone(), d.clone(), p, q).unwrap();
        assert_eq!(&n, key.public_key().modulus());
        key_basics(&key);

        // 不带素因子的私钥结果与CRT一致
        let plain = PrivateKey::new(n, e, d).unwrap();
        let c = BigUint::from(123456789u32);
        assert_eq!(plain.raw_private(&c), key.raw_private(&c));
    }

    #[test]
    fn rsa_key_2048() {
        let key = testdata::key_2048();
        assert_eq!(key.public_key().bits(), 2048);
        assert_eq!(key.public_key().exponent(), &BigUint::from(3u32));
        key_basics(&key);
    }

    #[test]
    fn public_key_validation() {
        let n = dec("290684273230919398108010081414538931343");
        assert!(PublicKey::new(n.clone(), BigUint::from(65537u32)).is_ok());

        for e in [0u32, 1, 4, 65536] {
            assert!(matches!(
                PublicKey::new(n.clone(), BigUint::from(e)),
                Err(RsaError::InvalidKey(_))
            ));
        }
        assert!(PublicKey::new(n.clone(), &n + 2u32).is_err());
        assert!(PublicKey::new(&n + 1u32, BigUint::from(3u32)).is_err());
    }

    #[test]
    fn private_key_validation() {
        let n = dec("290684273230919398108010081414538931343");
        let e = BigUint::from(65537u32);
        let d = dec("31877380284581499213530787347443987241");
        let (p, q) = (dec("16775196964030542637"), dec("17328218193455850539"));

        // p * q != n
        assert!(matches!(
            PrivateKey::from_components(&n + 2u32, e.clone(), d.clone(), p.clone(), q.clone()),
            Err(RsaError::InvalidKey(_))
        ));
        // d与e不匹配
        assert!(matches!(
            PrivateKey::from_components(n.clone(), e.clone(), &d + 2u32, p.clone(), q.clone()),
            Err(RsaError::InvalidKey(_))
        ));
        assert!(PrivateKey::new(n.clone(), e.clone(), &d + 2u32).is_err());

        // from_primes导出的d满足lambda(n), 与上面的d在CRT上等价
        let key = PrivateKey::from_primes(p.clone(), q, e).unwrap();
        assert_eq!(key.public_key().modulus(), &n);
        key_basics(&key);
        assert!(PrivateKey::from_primes(p.clone(), p, BigUint::from(3u32)).is_err());
    }

    #[test]
    fn deserialized_degenerate_factor() {
        let key = testdata::key_512();
        let n = key.public_key().modulus().clone();

        // p * q == n, 但其中一个因子为1
        for (p, q) in [(BigUint::one(), n.clone()), (n.clone(), BigUint::one())] {
            let mut v = serde_json::to_value(&key).unwrap();
            v["factor"]["p"] = serde_json::to_value(&p).unwrap();
            v["factor"]["q"] = serde_json::to_value(&q).unwrap();

            let bad: PrivateKey = serde_json::from_value(v).unwrap();
            assert!(matches!(bad.is_valid(), Err(RsaError::InvalidKey(_))));
        }

        let mut v = serde_json::to_value(&key).unwrap();
        v["factor"]["p"] = serde_json::to_value(BigUint::from(0u8)).unwrap();
        let bad: PrivateKey = serde_json::from_value(v).unwrap();
        assert!(matches!(bad.is_valid(), Err(RsaError::InvalidKey(_))));
    }
}
