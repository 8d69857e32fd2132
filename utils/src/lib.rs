//! 大整数运算的补充: 模逆, 随机数, 素数测试和素数生成.
//!
//! 模幂运算直接使用`num_bigint::BigUint::modpow`.

mod biguint_ext;
pub use biguint_ext::BigUintExt;
