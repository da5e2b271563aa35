use clap::Parser;
use custcmd::cli::{
    run_add, run_delete, run_edit, run_list, run_menu, run_persons, run_rename, run_show, run_unit,
    Cli, Commands,
};
use custcmd::{Config, HttpCustomerApi, Store};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?.with_overrides(cli.api_url.clone(), cli.domain.clone());
    config.validate()?;
    log::debug!("using {}", config.api_url);

    // One logical UI thread; unit writes interleave on it rather than run in parallel.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli, config))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let api = HttpCustomerApi::new(&config)?;
    let store = Store::new(Arc::new(api));

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&store, &config).await?;
        }
        Some(Commands::List(args)) => {
            run_list(&store, args.search.as_deref()).await?;
        }
        Some(Commands::Show(args)) => {
            run_show(&store, args.group_id, args.units.as_deref()).await?;
        }
        Some(Commands::Unit(args)) => {
            run_unit(&store, args.unit_id).await?;
        }
        Some(Commands::Add(args)) => {
            run_add(&store, &config, args.name, args.description, args.units).await?;
        }
        Some(Commands::Edit(args)) => {
            run_edit(&store, &config, args.group_id).await?;
        }
        Some(Commands::Rename(args)) => {
            run_rename(&store, args.group_id, args.name, args.description).await?;
        }
        Some(Commands::Delete(args)) => {
            run_delete(&store, args.group_id, args.force).await?;
        }
        Some(Commands::Persons) => {
            run_persons(&store, &config.person_domain).await?;
        }
    }

    Ok(())
}
