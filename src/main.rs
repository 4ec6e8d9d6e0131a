use anyhow::Result;
use clap::Parser;

use gitswitch::{
    commands,
    git::GitCli,
    paths::Paths,
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "gitswitch")]
#[command(about = "Git switch configuration tool - switch git identity and SSH key by profile")]
#[command(version)]
struct Cli {
    /// Profile name, as listed under `specific` in confs.yaml
    conf: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let ui = Ui::new(cli.color, cli.no_color);

    commands::switch(&paths, &cli.conf, &GitCli, &ui)
}
