//! MGF1: 基于哈希函数的掩码生成函数
//!
//! $T = Hash(mgfSeed \Vert C_0) \Vert Hash(mgfSeed \Vert C_1) \Vert ...$, 其中$C_i$为4字节大端计数器,
//! 输出T的前maskLen字节.

use crate::{HasherType, RsaError};

/// 生成`mask_len`字节的掩码
pub fn mgf1(seed: &[u8], mask_len: usize, hasher: HasherType) -> Result<Vec<u8>, RsaError> {
    let mut mask = vec![0u8; mask_len];
    mgf1_xor(mask.as_mut_slice(), seed, hasher)?;
    Ok(mask)
}

/// `out ^= MGF1(seed, out.len())`
pub fn mgf1_xor(out: &mut [u8], seed: &[u8], hasher: HasherType) -> Result<(), RsaError> {
    let h_len = hasher.digest_len();
    let limit = (h_len as u128) << 32;
    if out.len() as u128 > limit {
        return Err(RsaError::MaskTooLong {
            mask_len: out.len(),
            limit,
        });
    }

    let mut h = hasher.build();
    for (counter, chunk) in out.chunks_mut(h_len).enumerate() {
        h.write_x(seed);
        h.write_x(&(counter as u32).to_be_bytes());
        let digest = h.finish_x();
        chunk
            .iter_mut()
            .zip(digest.iter())
            .for_each(|(a, &b)| *a ^= b);
    }

    Ok(())
}
