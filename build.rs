use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    Ok(if output.status.success() {
        String::from_utf8(output.stdout)?
    } else {
        String::from_utf8(output.stderr)?
    })
}

fn main() {
    // 不在git仓库中构建时只输出版本和时间
    let git_commit_hash = exe_cmd(Command::new("git").args(["log", "-n", "1", "--pretty=format:%H"]))
        .ok()
        .filter(|s| s.len() >= 8 && s.chars().all(|c| c.is_ascii_hexdigit()))
        .map(|s| s[..8].to_string());

    let build_time = DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z");
    match git_commit_hash {
        Some(hash) => println!(
            "cargo:rustc-env=RSASIG_VERSION_INFO={}-{}-{}",
            env!("CARGO_PKG_VERSION"),
            hash,
            build_time
        ),
        None => println!(
            "cargo:rustc-env=RSASIG_VERSION_INFO={}-{}",
            env!("CARGO_PKG_VERSION"),
            build_time
        ),
    }
    println!("cargo:rerun-if-changed=build.rs");
}
