use crate::cmd::key::{load_private_key, load_public_key};
use crate::cmd::{Cmd, SigConfig};
use crate::SigError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crypto_hash::HasherType;
use rsassa::rsa::{
    sign_pkcs1v15_digest, sign_pss_digest, verify_pkcs1v15_digest, verify_pss_digest, PKCS1Sign,
    PKCS1Verify, PSSParameters, PSSSign, PSSVerify, SaltLength,
};
use rsassa::{DefaultRand, Sign, Verify};
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Pss,
    Pkcs1,
}

impl FromStr for Scheme {
    type Err = SigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pss" => Ok(Self::Pss),
            "pkcs1" | "pkcs1v15" => Ok(Self::Pkcs1),
            _ => Err(SigError::InvalidScheme(s.to_string())),
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pss => f.write_str("pss"),
            Self::Pkcs1 => f.write_str("pkcs1"),
        }
    }
}

/// `hash` | `max` | `auto` | 十进制数
pub fn parse_salt_len(s: &str) -> Result<SaltLength, SigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "hash" => Ok(SaltLength::EqualsHash),
        "max" => Ok(SaltLength::Max),
        "auto" => Ok(SaltLength::Auto),
        x => x
            .parse::<usize>()
            .map(SaltLength::Fixed)
            .map_err(|_| SigError::InvalidSaltLen(s.to_string())),
    }
}

/// 签名和验证共用的参数, 命令行未指定的项取自配置
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignParams {
    pub scheme: Scheme,
    pub hasher: HasherType,
    pub pss: PSSParameters,
    pub prehashed: bool,
}

impl SignParams {
    pub fn from_matches(m: &ArgMatches, cfg: &SigConfig) -> anyhow::Result<Self> {
        let scheme = match m.get_one::<String>("scheme") {
            Some(s) => s.parse::<Scheme>()?,
            None => cfg.scheme()?,
        };
        let hasher = match m.get_one::<String>("hash") {
            Some(s) => s.parse::<HasherType>()?,
            None => cfg.hasher()?,
        };
        let mgf1 = match m.get_one::<String>("mgf1") {
            Some(s) => s.parse::<HasherType>()?,
            None => hasher,
        };
        let salt_len = match m.get_one::<String>("salt-len") {
            Some(s) => parse_salt_len(s)?,
            None => cfg.salt_len()?,
        };

        Ok(Self {
            scheme,
            hasher,
            pss: PSSParameters::new(hasher)
                .with_mgf1_hasher(mgf1)
                .with_salt_len(salt_len),
            prehashed: m.get_flag("prehashed"),
        })
    }

    fn check_digest_len(&self, digest: &[u8]) -> anyhow::Result<()> {
        anyhow::ensure!(
            digest.len() == self.hasher.digest_len(),
            "the prehashed message length `{}` mismatch to {}",
            digest.len(),
            self.hasher
        );
        Ok(())
    }
}

fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("key")
            .action(ArgAction::Set)
            .short('k')
            .long("key")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("key file path"),
    )
    .arg(
        Arg::new("file")
            .short('f')
            .long("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .action(ArgAction::Set)
            .help("the message file path"),
    )
    .arg(
        Arg::new("scheme")
            .long("scheme")
            .action(ArgAction::Set)
            .required(false)
            .help("signature scheme, `pss` or `pkcs1`"),
    )
    .arg(
        Arg::new("hash")
            .long("hash")
            .short('H')
            .action(ArgAction::Set)
            .required(false)
            .help(format!(
                "message digest algorithm: {}",
                HasherType::all()
                    .iter()
                    .map(|h| h.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
    )
    .arg(
        Arg::new("mgf1")
            .long("mgf1")
            .action(ArgAction::Set)
            .required(false)
            .help("the digest algorithm used by MGF1, default is the same as `--hash`"),
    )
    .arg(
        Arg::new("salt-len")
            .long("salt-len")
            .action(ArgAction::Set)
            .required(false)
            .help("pss salt length: `hash`, `max`, `auto` or the bytes number"),
    )
    .arg(
        Arg::new("prehashed")
            .long("prehashed")
            .action(ArgAction::SetTrue)
            .required(false)
            .help("the message file content is the digest of the message"),
    )
}

fn path_arg<'a>(m: &'a ArgMatches, id: &str) -> anyhow::Result<&'a PathBuf> {
    m.get_one::<PathBuf>(id)
        .ok_or_else(|| anyhow::anyhow!("missing the argument `{id}`"))
}

fn read_file(p: &Path) -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(1024);
    let mut f = File::open(p)?;
    let _len = f.read_to_end(&mut data)?;
    Ok(data)
}

pub struct SignCmd;

impl Cmd for SignCmd {
    const NAME: &'static str = "sign";

    fn cmd() -> Command {
        common_args(Command::new(Self::NAME).about("rsa signer")).arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(false)
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("to specify the output file path to save the signature"),
        )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let params = SignParams::from_matches(m, SigConfig::config())?;
        let key = load_private_key(path_arg(m, "key")?)?;
        let msg = read_file(path_arg(m, "file")?)?;

        let mut sig = Vec::with_capacity(key.public_key().size());
        if params.prehashed {
            params.check_digest_len(msg.as_slice())?;
            let mut rd = DefaultRand::default();
            sig = match params.scheme {
                Scheme::Pss => sign_pss_digest(&key, msg.as_slice(), &params.pss, &mut rd)?,
                Scheme::Pkcs1 => sign_pkcs1v15_digest(&key, msg.as_slice(), Some(params.hasher))?,
            };
        } else {
            let signer: Box<dyn Sign> = match params.scheme {
                Scheme::Pss => Box::new(PSSSign::<DefaultRand>::new(key, params.pss)?),
                Scheme::Pkcs1 => Box::new(PKCS1Sign::new(key, params.hasher)?),
            };
            signer.sign(msg.as_slice(), &mut sig)?;
        }

        println!("{}", hex::encode(sig.as_slice()));

        if let Some(p) = m.get_one::<PathBuf>("output") {
            let mut f = OpenOptions::new().create_new(true).write(true).open(p)?;
            f.write_all(sig.as_slice())?;
            log::info!(
                "{} signature with {} written to `{}`",
                params.scheme,
                params.hasher,
                p.display()
            );
        }

        Ok(())
    }
}

pub struct VerifyCmd;

impl Cmd for VerifyCmd {
    const NAME: &'static str = "verify";

    fn cmd() -> Command {
        common_args(Command::new(Self::NAME).about("rsa signature verifier")).arg(
            Arg::new("signature")
                .long("signature")
                .short('s')
                .required(true)
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("the signature file path"),
        )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let params = SignParams::from_matches(m, SigConfig::config())?;
        let key = load_public_key(path_arg(m, "key")?)?;
        let msg = read_file(path_arg(m, "file")?)?;
        let sig = read_file(path_arg(m, "signature")?)?;

        let valid = if params.prehashed {
            params.check_digest_len(msg.as_slice())?;
            match params.scheme {
                Scheme::Pss => verify_pss_digest(&key, msg.as_slice(), sig.as_slice(), &params.pss),
                Scheme::Pkcs1 => verify_pkcs1v15_digest(
                    &key,
                    msg.as_slice(),
                    sig.as_slice(),
                    Some(params.hasher),
                ),
            }
        } else {
            let verifier: Box<dyn Verify> = match params.scheme {
                Scheme::Pss => Box::new(PSSVerify::new(key, params.pss)?),
                Scheme::Pkcs1 => Box::new(PKCS1Verify::new(key, params.hasher)?),
            };
            verifier.verify(msg.as_slice(), sig.as_slice()).is_ok()
        };

        if valid {
            println!("Validation success.");
            Ok(())
        } else {
            Err(SigError::ValidationFailed.into())
        }
    }
}
