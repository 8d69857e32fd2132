use crate::{DigestX, HashError};
use digest::core_api::BlockSizeUser;
use digest::OutputSizeUser;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// `$ITEM`: 算法标识, `$VAL`: 标识号, `$STR`: 命令行/配置中使用的名字, `$HASHER`: 实现类型
macro_rules! impl_hasher_type {
    ($NAME: ident, $([$ITEM: tt $(=$VAL: literal)?, $STR: literal, $HASHER: ty]),+) => {
        #[repr(u32)]
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum $NAME {
            $($ITEM $(=$VAL)?,)+
        }

        impl TryFrom<u32> for $NAME {
            type Error = HashError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == Self::$ITEM as u32 => Ok(Self::$ITEM),)+
                    _ => Err(HashError::UnsupportedHasher(format!("{:#x}", value))),
                }
            }
        }

        impl FromStr for $NAME {
            type Err = HashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($STR => Ok(Self::$ITEM),)+
                    _ => Err(HashError::UnsupportedHasher(s.to_string())),
                }
            }
        }

        impl Display for $NAME {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$ITEM => f.write_str($STR),)+
                }
            }
        }

        impl $NAME {
            pub fn all() -> &'static [Self] {
                &[$(Self::$ITEM,)+]
            }

            pub fn build(self) -> Box<dyn DigestX + Send> {
                match self {
                    $(Self::$ITEM => Box::new(<$HASHER>::default()),)+
                }
            }

            /// 摘要的字节长度
            pub fn digest_len(self) -> usize {
                match self {
                    $(Self::$ITEM => <$HASHER as OutputSizeUser>::output_size(),)+
                }
            }

            /// 分块的字节长度
            pub fn block_len(self) -> usize {
                match self {
                    $(Self::$ITEM => <$HASHER as BlockSizeUser>::block_size(),)+
                }
            }
        }

    };
}

impl_hasher_type!(
    HasherType,
    [SHA1 = 0x20, "sha1", sha1::Sha1],
    [SHA2_224, "sha224", sha2::Sha224],
    [SHA2_256, "sha256", sha2::Sha256],
    [SHA2_384, "sha384", sha2::Sha384],
    [SHA2_512, "sha512", sha2::Sha512],
    [SHA2_512T224, "sha512-224", sha2::Sha512_224],
    [SHA2_512T256, "sha512-256", sha2::Sha512_256]
);

impl HasherType {
    /// 哈希算法能处理的最大消息字节长度, FIPS 180-4
    pub fn max_input_len(self) -> u128 {
        if self.block_len() == 64 {
            (1u128 << 61) - 1
        } else {
            (1u128 << 125) - 1
        }
    }

    /// 一次性计算`msg`的摘要
    pub fn digest(self, msg: &[u8]) -> Result<Vec<u8>, HashError> {
        let limit = self.max_input_len();
        if msg.len() as u128 > limit {
            return Err(HashError::InputTooLong { limit });
        }

        let mut h = self.build();
        h.write_x(msg);
        Ok(h.finish_x())
    }
}
