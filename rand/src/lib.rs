//! 随机数源
//!
//! 签名过程中只有PSS的salt需要随机数, 调用方可以替换为确定性的`FixedRand`以复现测试向量.

pub trait Rand {
    /// 用随机字节填满`random`
    fn rand(&mut self, random: &mut [u8]);
}

mod default_rand;
pub use default_rand::DefaultRand;

mod fixed_rand;
pub use fixed_rand::FixedRand;

impl<T: xrand::RngCore + xrand::CryptoRng> Rand for T {
    fn rand(&mut self, random: &mut [u8]) {
        self.fill_bytes(random);
    }
}
