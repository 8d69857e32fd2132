//! 消息摘要提供者
//!
//! 哈希算法本身由RustCrypto的`sha1`/`sha2`实现, 本crate只负责:
//! - 通过`HasherType`按算法标识查找摘要长度, DigestInfo前缀等信息;
//! - 通过`DigestX`以trait object的方式使用不同的哈希算法.

use digest::core_api::BlockSizeUser;
use digest::{FixedOutputReset, OutputSizeUser, Reset, Update};

mod error;
pub use error::HashError;

mod builder;
pub use builder::HasherType;

mod digest_info;

/// 对象安全的哈希接口, 可通过`HasherType::build`得到`Box<dyn DigestX>`.
pub trait DigestX {
    /// 哈希算法每次按块处理消息的块的位长度
    fn block_bits_x(&self) -> usize;
    /// 哈希算法生成的摘要的位长度
    fn digest_bits_x(&self) -> usize;
    fn write_x(&mut self, data: &[u8]);
    /// 输出摘要并重置到初始状态
    fn finish_x(&mut self) -> Vec<u8>;
    fn reset_x(&mut self);
}

impl<T> DigestX for T
where
    T: FixedOutputReset + BlockSizeUser,
{
    fn block_bits_x(&self) -> usize {
        <T as BlockSizeUser>::block_size() << 3
    }

    fn digest_bits_x(&self) -> usize {
        <T as OutputSizeUser>::output_size() << 3
    }

    fn write_x(&mut self, data: &[u8]) {
        Update::update(self, data);
    }

    fn finish_x(&mut self) -> Vec<u8> {
        FixedOutputReset::finalize_fixed_reset(self).to_vec()
    }

    fn reset_x(&mut self) {
        Reset::reset(self);
    }
}
