use crate::cli::OrderArgs;
use crate::error::{CliError, Result};
use molview::core::ordering::depth::DrawItem;
use molview::engine::config::{ViewConfig, ViewConfigBuilder};
use molview::engine::error::EngineError;
use molview::workflows::render::{self, RenderPlan};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::info;

pub fn run(args: OrderArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let plan = prepare(&args, &config)?;

    let stdout = std::io::stdout();
    write_plan(&plan, &mut stdout.lock())
}

/// Loads the config file, if any, and layers the command-line overrides on top.
fn resolve_config(args: &OrderArgs) -> Result<ViewConfig> {
    let mut base = match &args.config {
        Some(path) => {
            info!("Loading view configuration from {:?}", path);
            ViewConfig::load(path)?
        }
        None => ViewConfig::default(),
    };

    if !args.rotations.is_empty() {
        base.rotations.clear();
    }

    let mut builder = ViewConfigBuilder::from_config(base);
    for spec in &args.rotations {
        builder = builder.rotation_spec(spec.as_str());
    }
    if let Some(policy) = args.degenerate_bonds {
        builder = builder.degenerate_bonds(policy);
    }
    if let Some(policy) = args.atom_updates {
        builder = builder.atom_updates(policy);
    }
    Ok(builder.build()?)
}

fn prepare(args: &OrderArgs, config: &ViewConfig) -> Result<RenderPlan> {
    info!("Loading input molecule from {:?}", &args.input);
    let file = File::open(&args.input)?;
    let mut reader = BufReader::new(file);
    render::prepare(&mut reader, config).map_err(|e| classify_error(&args.input, e))
}

/// Attributes read failures to the input file; anything later in the workflow
/// is reported as a core error.
fn classify_error(input: &Path, error: EngineError) -> CliError {
    match error {
        EngineError::Read { source } => CliError::FileParsing {
            path: input.to_path_buf(),
            source: source.into(),
        },
        other => CliError::Core(other),
    }
}

/// Prints one line per draw item, back to front.
fn write_plan(plan: &RenderPlan, out: &mut impl Write) -> Result<()> {
    let atoms = plan.molecule.atoms();
    let bonds = plan.molecule.bonds();

    for item in &plan.draw_order {
        match *item {
            DrawItem::Atom(index) => {
                let atom = &atoms[index.get()];
                writeln!(
                    out,
                    "atom {:>4} {:<2} z={:>10.4}",
                    index.get(),
                    atom.element.as_str(),
                    atom.position.z
                )?;
            }
            DrawItem::Bond(index) => {
                let bond = &bonds[index.get()];
                writeln!(
                    out,
                    "bond {:>4} {}-{} x{} z={:>10.4}",
                    index.get(),
                    bond.atom1.get(),
                    bond.atom2.get(),
                    bond.electron_pairs,
                    bond.depth()
                )?;
            }
        }
    }
    Ok(())
}
