use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use optimistic_counter::cli::Cli;
use optimistic_counter::config::{Config, Preset};
use optimistic_counter::counter::{bound_label, CounterStore};
use optimistic_counter::driver::{self, ReconciliationDriver, SimulatedRemote};
use optimistic_counter::script::{parse_script, run_script};
use optimistic_counter::{logging, ui};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _log_file = logging::init_tracing();

    if cli.list_presets {
        print_presets();
        return;
    }

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&cli, config).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: Config) -> anyhow::Result<()> {
    let bounds = config.bounds()?;
    let store = CounterStore::new(bounds);
    let remote = SimulatedRemote::from_config(&config.remote, store.reducer());
    let mut driver = ReconciliationDriver::new(store, Arc::new(remote));

    tracing::info!(
        initial = bounds.initial_value(),
        min = bounds.min(),
        max = bounds.max(),
        step = config.counter.step,
        delay_ms = config.remote.delay_ms,
        failure_probability = config.remote.failure_probability,
        "Starting counter"
    );

    match &cli.script {
        Some(script) => {
            let actions = parse_script(script, config.counter.step)?;
            let mut events = driver.subscribe_events();
            let handle = driver::spawn(driver);
            let mut out = io::stdout();
            run_script(&handle, &mut events, &actions, &mut out).await?;
            handle.shutdown().await?;
        }
        None => {
            let handle = driver::spawn(driver);
            ui::run(&config, &handle)
                .await
                .context("Terminal UI failed")?;
            handle.shutdown().await?;
        }
    }

    Ok(())
}

fn print_presets() {
    for preset in Preset::all() {
        let mut config = Config::default();
        preset.apply(&mut config);
        let name = clap::ValueEnum::to_possible_value(preset)
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        let range = format!(
            "{} ~ {}",
            bound_label(config.counter.min),
            bound_label(config.counter.max)
        );
        println!(
            "{:<16} range={:<12} initial={} step={} delay={}ms error_rate={}",
            name,
            range,
            config.counter.initial_value,
            config.counter.step,
            config.remote.delay_ms,
            config.remote.failure_probability
        );
    }
}
