use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_workforce::decode::{decode_schedules, variable_values};
use u_workforce::io::{describe, load_instance, save_instance};
use u_workforce::mip::build_model;
use u_workforce::solver::submit;
use u_workforce::validation::join_messages;

#[derive(Debug, Parser)]
#[command(
    name = "u-workforce",
    about = "Workforce shift scheduling via mixed-integer programming"
)]
struct Cli {
    /// Path to the instance JSON file.
    instance: PathBuf,
    /// Directory for per-run artifacts (LP dump, value map, schedules).
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,
    /// Seed for the random-instance path.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let stem = cli
        .instance
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".into());
    let run_dir = cli.out_dir.join(&stem);
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("cannot create output directory {}", run_dir.display()))?;

    let loaded = load_instance(&cli.instance, cli.seed)
        .with_context(|| format!("cannot load instance {}", cli.instance.display()))?;
    info!("loaded instance: {}", describe(&loaded.instance));

    if loaded.was_generated {
        let echo_path = run_dir.join(format!("loaded_{stem}.json"));
        save_instance(&loaded.instance, &echo_path)
            .with_context(|| format!("cannot echo generated instance to {}", echo_path.display()))?;
        info!("generated instance echoed to {}", echo_path.display());
    }

    let model = match build_model(&loaded.instance) {
        Ok(model) => model,
        Err(errors) => bail!("instance failed validation: {}", join_messages(&errors)),
    };

    let lp_path = run_dir.join("model.lp");
    fs::write(&lp_path, model.to_lp_string("workforce_schedule"))
        .with_context(|| format!("cannot write LP export to {}", lp_path.display()))?;
    info!(
        variables = model.variable_count(),
        rows = model.row_count(),
        "model exported to {}",
        lp_path.display()
    );

    let outcome = submit(&model);
    if !outcome.status.is_optimal() {
        bail!("solver finished with status: {}", outcome.status);
    }
    let objective = outcome.objective.unwrap_or_default();
    let values = outcome.values.unwrap_or_default();
    info!(objective, "optimal solution found");

    let value_map = variable_values(&model.index, &values);
    let values_path = run_dir.join("variables.json");
    fs::write(&values_path, serde_json::to_string_pretty(&value_map)?)?;

    let (worker_schedule, order_schedule) = decode_schedules(&loaded.instance, &model.index, &values);
    fs::write(
        run_dir.join("worker_schedule.json"),
        serde_json::to_string_pretty(&worker_schedule)?,
    )?;
    fs::write(
        run_dir.join("orders_schedule.json"),
        serde_json::to_string_pretty(&order_schedule)?,
    )?;
    info!(
        scheduled_orders = order_schedule.scheduled_count(),
        active_workers = worker_schedule.worker_count(),
        "schedules written to {}",
        run_dir.display()
    );

    println!("objective: {objective}");
    println!("status: {}", outcome.status);
    println!("artifacts: {}", run_dir.display());
    Ok(())
}
