use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One, ToPrimitive, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

// 3 * 5 * ... * 53
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];
const SMALL_PRIMES_PRODUCT: u64 = 16294579238595022365u64;

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// self * inv = 1 \mod modulus
    ///
    /// 扩展欧几里得算法: 若gcd(a, n) = ax + ny = 1, 则x即a在模n下的逆元.
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() {
            return None;
        }

        let (a, n) = (
            BigInt::from(self.deref() % modulus),
            BigInt::from(modulus.clone()),
        );
        let g = a.extended_gcd(&n);
        if g.gcd.is_one() {
            g.x.rem_euclid(&n).to_biguint()
        } else {
            None
        }
    }

    /// 生成[0..self)之间均匀分布的随机数, self为0时返回0
    pub fn gen_random<R: Rand>(&self, rng: &mut R) -> BigUint {
        if self.is_zero() {
            return BigUint::zero();
        }

        let bits = self.bits() as usize;
        let (mut buf, top) = (vec![0u8; (bits + 7) >> 3], bits & 7);

        loop {
            rng.rand(buf.as_mut_slice());
            // 清除高于bits的位, 使拒绝采样的概率小于1/2
            if top != 0 {
                buf[0] &= (1u8 << top) - 1;
            }

            let r = BigUint::from_bytes_be(buf.as_slice());
            if &r < self.deref() {
                return r;
            }
        }
    }

    /// 先用小素数试除, 再进行`rounds`轮Miller-Rabin测试.
    ///
    /// 对于奇合数, 每轮Miller-Rabin测试误判的概率至多为$4^{-1}$.
    pub fn probably_prime<R: Rand>(&self, rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        if let Some(x) = n.to_u64() {
            if x < 2 {
                return false;
            }
            if x == 2 || SMALL_PRIMES.iter().any(|&p| p as u64 == x) {
                return true;
            }
        }

        if n.is_even() {
            return false;
        }

        let r = (n % SMALL_PRIMES_PRODUCT)
            .to_u64()
            .unwrap_or_default();
        if SMALL_PRIMES.iter().any(|&p| r % (p as u64) == 0) {
            return false;
        }

        self.miller_rabin(rounds.max(1), rng)
    }

    // n - 1 = 2^s * d, d为奇数
    // 随机选择a \in [2, n-2], 若a^d != 1且对所有0 <= j < s, a^{2^j * d} != n-1, 则n是合数.
    // 调用方保证n是大于53的奇数
    fn miller_rabin<R: Rand>(&self, rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        let n_m1 = n - 1u32;
        let s = n_m1.trailing_zeros().unwrap_or(0);
        let d = &n_m1 >> s;
        let range = BigUintExt(n - 3u32);

        'witness: for _ in 0..rounds {
            let a = range.gen_random(rng) + 2u32;
            let mut y = a.modpow(&d, n);
            if y.is_one() || y == n_m1 {
                continue;
            }

            for _ in 1..s {
                y = y.modpow(&BigUint::from(2u32), n);
                if y == n_m1 {
                    continue 'witness;
                }
                if y.is_one() {
                    return false;
                }
            }

            return false;
        }

        true
    }

    /// 生成位长度恰好为`bits_len`的素数, 最高两位固定为1, 这样两个素数的乘积不会短一位.
    ///
    /// `rounds`: Miller-Rabin测试的轮数
    pub fn generate_prime<R: Rand>(
        bits_len: usize,
        rounds: usize,
        rng: &mut R,
    ) -> Result<BigUint, String> {
        if bits_len < 2 {
            return Err("prime size must at least 2-bits".to_string());
        }

        let (mut p, top) = (vec![0u8; (bits_len + 7) >> 3], bits_len & 7);
        loop {
            rng.rand(p.as_mut_slice());

            if top == 0 {
                p[0] |= 0xc0;
            } else {
                p[0] &= (1u8 << top) - 1;
                if top >= 2 {
                    p[0] |= 3u8 << (top - 2);
                } else {
                    // 最高位是p[0]的最低位, 次高位在p[1]
                    p[0] |= 1;
                    p[1] |= 0x80;
                }
            }

            if let Some(x) = p.last_mut() {
                *x |= 1;
            }

            let n = BigUintExt(BigUint::from_bytes_be(p.as_slice()));
            if n.bits() as usize == bits_len && n.probably_prime(rounds, rng) {
                return Ok(n.0);
            }
        }
    }
}
