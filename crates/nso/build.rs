use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only needs clap + clap_complete, both build-dependencies.
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

/// Writes `man/nso*.1` and `completions/*` under `OUT_DIR` for packagers.
fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR").map(PathBuf::from) else {
        return Err(io::Error::other("OUT_DIR not set by Cargo"));
    };

    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    write_manpages(&cmd, &man_dir)?;

    let completions_dir = out_dir.join("completions");
    fs::create_dir_all(&completions_dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd, "nso", &completions_dir)?;
    }

    Ok(())
}

/// One page per command, `nso-devices-create.1` style for subcommands.
fn write_manpages(cmd: &clap::Command, dir: &Path) -> io::Result<()> {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    fs::write(dir.join(format!("{name}.1")), page)?;

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_manpages(&sub, dir)?;
    }
    Ok(())
}
