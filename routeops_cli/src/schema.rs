use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Writes the schema to a file instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = routeops_optimizer::json::schema::generate_json_schema()?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
        None => println!("{schema}"),
    }

    Ok(())
}
