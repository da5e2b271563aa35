use clap::{ArgAction, Args, Parser, Subcommand};

pub mod add;
pub mod delete;
pub mod display;
pub mod edit;
pub mod form;
pub mod list;
pub mod menu;
pub mod persons;
pub mod show;
pub mod ui;

pub use add::run_add;
pub use delete::run_delete;
pub use edit::{run_edit, run_rename};
pub use list::run_list;
pub use menu::run_menu;
pub use persons::run_persons;
pub use show::{run_show, run_unit};

#[derive(Parser)]
#[command(name = "custcmd")]
#[command(about = "Customer groups and units from the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the customer API
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    /// Email domain of the responsible-person directory
    #[arg(long, global = true)]
    pub domain: Option<String>,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List customer groups
    List(ListArgs),
    /// Show a group with its units and responsible persons
    Show(ShowArgs),
    /// Show one unit
    Unit(UnitArgs),
    /// Add a complete customer (group and units)
    Add(AddArgs),
    /// Edit a complete customer interactively
    Edit(EditArgs),
    /// Change a group's name or description
    Rename(RenameArgs),
    /// Delete a group and its units
    Delete(DeleteArgs),
    /// List persons who can be responsible for a unit
    Persons,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only groups whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub group_id: i64,
    /// Only units whose name contains this text
    #[arg(short, long)]
    pub units: Option<String>,
}

#[derive(Args)]
pub struct UnitArgs {
    pub unit_id: i64,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Unit name, repeat for several units
    #[arg(short, long = "unit", value_name = "NAME")]
    pub units: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    pub group_id: i64,
}

#[derive(Args)]
pub struct RenameArgs {
    pub group_id: i64,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub group_id: i64,
    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_units() {
        let cli = Cli::parse_from([
            "custcmd", "add", "--name", "Acme", "--unit", "Lyon", "--unit", "Paris",
        ]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name.as_deref(), Some("Acme"));
                assert_eq!(args.units, vec!["Lyon", "Paris"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["custcmd", "-vv", "list", "--api-url", "http://localhost:8080"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080"));
    }
}
