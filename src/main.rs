use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use log::info;
use smidraw::{
    build_molecule, config::DrawOptions, read_smiles, save_drawing, Error,
};

/// Draw a 2D depiction of a molecule given as SMILES.
#[derive(Parser)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["smiles", "input"])
))]
struct Cli {
    /// The SMILES string to draw. Pass `-` to read it from standard input.
    #[arg(long)]
    smiles: Option<String>,

    /// A file whose first line is the SMILES string to draw.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the image. A `.svg` extension produces SVG, anything
    /// else produces PNG. Missing parent directories are created.
    #[arg(long)]
    output: PathBuf,

    /// The image width and height in pixels.
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [400, 300],
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    size: Vec<u32>,

    /// A TOML file of drawing options overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), Error> {
    let opts = match &cli.config {
        Some(path) => {
            info!("loading draw options from {}", path.display());
            DrawOptions::load(path)?
        }
        None => DrawOptions::default(),
    };
    let smiles = read_smiles(
        cli.smiles.as_deref(),
        cli.input.as_deref(),
        std::io::stdin().lock(),
    )?;
    let mol = build_molecule(&smiles)?;
    save_drawing(&mol, &cli.output, (cli.size[0], cli.size[1]), &opts)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
