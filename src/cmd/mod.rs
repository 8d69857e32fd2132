use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod config;
pub use config::SigConfig;

mod key;
pub use key::KeyCmd;

mod sign;
pub use sign::{Scheme, SignCmd, SignParams, VerifyCmd};
