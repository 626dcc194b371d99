use crate::cli::args::InitArgs;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use review_bench_core::write_sample_config;

pub fn run(args: InitArgs) -> anyhow::Result<i32> {
    if args.config.exists() && !args.force {
        eprintln!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
        return Ok(CONFIG_ERROR);
    }
    write_sample_config(&args.config)?;
    eprintln!("Wrote sample config to {}", args.config.display());
    Ok(SUCCESS)
}
