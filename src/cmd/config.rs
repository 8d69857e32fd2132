use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::Config;
use crypto_hash::HasherType;
use rsassa::rsa::SaltLength;
use serde::{Deserialize, Serialize};

use super::sign::{parse_salt_len, Scheme};

static CONFIG: OnceLock<SigConfig> = OnceLock::new();

/// 命令行参数未指定时使用的默认值
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct SigConfig {
    // 消息摘要算法
    pub hasher: String,

    // pss | pkcs1
    pub scheme: String,

    // hash | max | auto | 十进制数
    pub salt_len: String,

    // 生成密钥时模数的位长
    pub key_bits: usize,

    pub prime_test_rounds: usize,
}

impl Default for SigConfig {
    fn default() -> Self {
        Self {
            hasher: HasherType::SHA2_256.to_string(),
            scheme: Scheme::Pss.to_string(),
            salt_len: "hash".to_string(),
            key_bits: 2048,
            prime_test_rounds: 19,
        }
    }
}

impl SigConfig {
    /// 未调用`init`时使用默认来源加载
    pub fn config() -> &'static Self {
        CONFIG.get_or_init(|| {
            Self::load(None).unwrap_or_else(|e| {
                log::warn!("load config failed, use the default config: {e:#}");
                Self::default()
            })
        })
    }

    /// 加载顺序: 默认值, 配置文件, 环境变量`RSASIG_*`
    pub fn init(f: Option<&Path>) -> anyhow::Result<&'static Self> {
        if let Some(cfg) = CONFIG.get() {
            return Ok(cfg);
        }

        let cfg = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| cfg))
    }

    fn default_file() -> Option<PathBuf> {
        home::home_dir().map(|h| h.join(".rsasig.json"))
    }

    pub fn load(f: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&SigConfig::default())?;
        let mut config = Config::builder().add_source(default_config);

        match f {
            Some(f) => {
                config = config.add_source(config::File::from(f).required(true));
            }
            None => {
                if let Some(f) = Self::default_file() {
                    config = config.add_source(config::File::from(f).required(false));
                }
            }
        }

        let config = config
            .add_source(
                config::Environment::with_prefix("RSASIG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: SigConfig = config.try_deserialize()?;
        // 提前检查, 避免使用时才报错
        cfg.hasher()?;
        cfg.scheme()?;
        cfg.salt_len()?;

        log::trace!("{:?}", cfg);
        Ok(cfg)
    }

    pub fn hasher(&self) -> anyhow::Result<HasherType> {
        Ok(self.hasher.parse::<HasherType>()?)
    }

    pub fn scheme(&self) -> anyhow::Result<Scheme> {
        Ok(self.scheme.parse::<Scheme>()?)
    }

    pub fn salt_len(&self) -> anyhow::Result<SaltLength> {
        Ok(parse_salt_len(&self.salt_len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::SigConfig;
    use crate::cmd::Scheme;
    use crypto_hash::HasherType;
    use rsassa::rsa::SaltLength;
    use std::io::Write;

    #[test]
    fn default_config() {
        let cfg = SigConfig::default();
        assert_eq!(cfg.hasher().unwrap(), HasherType::SHA2_256);
        assert_eq!(cfg.scheme().unwrap(), Scheme::Pss);
        assert_eq!(cfg.salt_len().unwrap(), SaltLength::EqualsHash);
        assert_eq!(cfg.key_bits, 2048);
        assert_eq!(cfg.prime_test_rounds, 19);
    }

    #[test]
    fn config_from_file() {
        let path = std::env::temp_dir().join(format!("rsasig-config-{}.json", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(br#"{"hasher": "sha384", "scheme": "pkcs1", "key_bits": 3072}"#)
            .unwrap();
        drop(f);

        let cfg = SigConfig::load(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
        let cfg = cfg.unwrap();

        assert_eq!(cfg.hasher().unwrap(), HasherType::SHA2_384);
        assert_eq!(cfg.scheme().unwrap(), Scheme::Pkcs1);
        assert_eq!(cfg.key_bits, 3072);
        // 文件中没有的字段保持默认值
        assert_eq!(cfg.salt_len, "hash");
        assert_eq!(cfg.prime_test_rounds, 19);
    }

    #[test]
    fn config_invalid_value() {
        let path = std::env::temp_dir().join(format!("rsasig-bad-{}.json", std::process::id()));
        std::fs::write(&path, br#"{"hasher": "md5"}"#).unwrap();
        let cfg = SigConfig::load(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
        assert!(cfg.is_err());

        assert!(SigConfig::load(Some(std::path::Path::new("/nonexistent/rsasig.json"))).is_err());
    }
}
