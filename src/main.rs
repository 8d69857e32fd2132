use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use rsasig::cmd::{Cmd, KeyCmd, SigConfig, SignCmd, VerifyCmd};
use rsasig::log_error;
use std::path::PathBuf;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("RSASIG_VERSION_INFO");
    let app = Command::new("rsasig")
        .version(version)
        .about("RSASSA-PSS and RSASSA-PKCS1-v1_5 signature tool")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("the configuration file path, default is `$HOME/.rsasig.json`"),
        )
        .subcommand(KeyCmd::cmd())
        .subcommand(SignCmd::cmd())
        .subcommand(VerifyCmd::cmd())
        .get_matches();

    if log_error(SigConfig::init(app.get_one::<PathBuf>("config").map(|p| p.as_path()))).is_none() {
        std::process::exit(1);
    }

    if let Some((s, m)) = app.subcommand() {
        let res = match s {
            KeyCmd::NAME => KeyCmd.run(m),
            SignCmd::NAME => SignCmd.run(m),
            VerifyCmd::NAME => VerifyCmd.run(m),
            name => Err(anyhow::anyhow!("unsupport for {}", name)),
        };

        if log_error(res).is_none() {
            std::process::exit(1);
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
    }
}
