use crate::Rand;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 按顺序循环输出预先给定的字节, 用于复现固定salt的签名.
///
/// 不能用于生产环境.
#[derive(Clone, Debug)]
pub struct FixedRand {
    data: Vec<u8>,
    // 下一个输出字节的索引
    idx: usize,
}

impl FixedRand {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            idx: 0,
        }
    }
}

impl Rand for FixedRand {
    fn rand(&mut self, random: &mut [u8]) {
        if self.data.is_empty() {
            random.fill(0);
            return;
        }

        for x in random.iter_mut() {
            *x = self.data[self.idx];
            self.idx = (self.idx + 1) % self.data.len();
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for FixedRand {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}
