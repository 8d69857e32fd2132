use crate::cmd::{Cmd, SigConfig};
use crate::SigError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rsassa::rsa::{PrivateKey, PublicKey};
use rsassa::DefaultRand;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct KeyCmd;

impl Cmd for KeyCmd {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("rsa key generate, the public exponent is fixed to 65537")
            .arg(
                Arg::new("bits")
                    .value_name("BITS")
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("to specify the public key modulus bits length"),
            )
            .arg(
                Arg::new("test")
                    .long("test")
                    .short('t')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("to specify the provable prime test rounds"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(value_parser!(PathBuf))
                    .help("to specify the output file path to save the key"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let cfg = SigConfig::config();
        let (bits, rounds) = (
            m.get_one::<usize>("bits").copied().unwrap_or(cfg.key_bits),
            m.get_one::<usize>("test")
                .copied()
                .unwrap_or(cfg.prime_test_rounds),
        );

        let mut out: Box<dyn Write> = match m.get_one::<PathBuf>("output") {
            Some(p) => {
                let f = OpenOptions::new().create_new(true).write(true).open(p)?;
                Box::new(f)
            }
            None => Box::new(std::io::stdout().lock()),
        };

        let mut rng = DefaultRand::default();
        let key = PrivateKey::generate_key(bits, rounds, &mut rng)?;
        let key = serde_json::to_string_pretty(&key)?;
        out.write_all(key.as_bytes())?;
        out.flush()?;

        log::info!("generated {bits}-bits rsa key");
        Ok(())
    }
}

fn invalid_key(p: &Path, msg: impl ToString) -> SigError {
    SigError::InvalidKeyFile {
        path: p.display().to_string(),
        msg: msg.to_string(),
    }
}

fn read_key_json(p: &Path) -> Result<serde_json::Value, SigError> {
    let f = File::open(p).map_err(|e| invalid_key(p, e))?;
    serde_json::from_reader(f).map_err(|e| invalid_key(p, e))
}

/// 读取`keygen`输出的私钥
pub(super) fn load_private_key(p: &Path) -> Result<PrivateKey, SigError> {
    let key: PrivateKey = serde_json::from_value(read_key_json(p)?).map_err(|e| invalid_key(p, e))?;
    key.is_valid().map_err(|e| invalid_key(p, e))?;
    Ok(key)
}

/// 私钥文件使用其中的`pk`字段, 否则按公钥解析
pub(super) fn load_public_key(p: &Path) -> Result<PublicKey, SigError> {
    let mut v = read_key_json(p)?;
    let v = if v.get("pk").is_some() {
        v["pk"].take()
    } else {
        v
    };

    let key: PublicKey = serde_json::from_value(v).map_err(|e| invalid_key(p, e))?;
    key.is_valid().map_err(|e| invalid_key(p, e))?;
    Ok(key)
}
