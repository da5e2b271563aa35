//! Main menu for custcmd
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::Select;

use crate::config::Config;
use crate::store::Store;

use super::ui::{clear_screen, confirm, is_interactive, minimal_render_config, prompt_for_input, wait_for_continue};
use super::{run_add, run_delete, run_edit, run_list, run_persons, run_rename, run_show, run_unit};

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    List,
    Search,
    Show,
    Unit,
    Add,
    Edit,
    Rename,
    Delete,
    Persons,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::List,
        MenuOption::Search,
        MenuOption::Show,
        MenuOption::Unit,
        MenuOption::Add,
        MenuOption::Edit,
        MenuOption::Rename,
        MenuOption::Delete,
        MenuOption::Persons,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::List => "List",
            MenuOption::Search => "Search",
            MenuOption::Show => "Show",
            MenuOption::Unit => "Unit",
            MenuOption::Add => "Add Complete Customer",
            MenuOption::Edit => "Edit Complete Customer",
            MenuOption::Rename => "Edit Group",
            MenuOption::Delete => "Delete",
            MenuOption::Persons => "Persons",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// Run the interactive main menu
pub async fn run_menu(store: &Store, config: &Config) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !is_interactive() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            custcmd list\n  \
            custcmd show <group-id>\n  \
            custcmd add --name <NAME>\n  \
            Run 'custcmd --help' for all options."
        ));
    }

    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        let _ = clear_screen();

        let selection = Select::new("custcmd", menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };
        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };
        if choice == MenuOption::Quit {
            return Ok(());
        }

        let _ = clear_screen();

        if let Err(e) = execute_command(store, config, choice).await {
            eprintln!("\nError: {}", e);
        }
        wait_for_continue();
    }
}

async fn execute_command(store: &Store, config: &Config, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::List => list_with_retry(store, None).await,
        MenuOption::Search => {
            let term = prompt_for_input("search: ")?;
            list_with_retry(store, Some(term.as_str())).await
        }
        MenuOption::Show => {
            let Some(id) = prompt_for_id("group id: ")? else {
                return Ok(());
            };
            let filter = prompt_for_input("unit filter: ")?;
            run_show(store, id, Some(filter.as_str())).await
        }
        MenuOption::Unit => {
            let Some(id) = prompt_for_id("unit id: ")? else {
                return Ok(());
            };
            run_unit(store, id).await
        }
        MenuOption::Add => run_add(store, config, None, None, Vec::new()).await,
        MenuOption::Edit => {
            let Some(id) = prompt_for_id("group id: ")? else {
                return Ok(());
            };
            run_edit(store, config, id).await
        }
        MenuOption::Rename => {
            let Some(id) = prompt_for_id("group id: ")? else {
                return Ok(());
            };
            run_rename(store, id, None, None).await
        }
        MenuOption::Delete => {
            let Some(id) = prompt_for_id("group id: ")? else {
                return Ok(());
            };
            run_delete(store, id, false).await
        }
        MenuOption::Persons => run_persons(store, &config.person_domain).await,
        MenuOption::Quit => Ok(()),
    }
}

/// The group list is the one view with a retry action on failure.
async fn list_with_retry(store: &Store, search: Option<&str>) -> Result<()> {
    loop {
        match run_list(store, search).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                eprintln!("Error Loading Data\n  {}", e);
                if !confirm("Try again?")? {
                    return Ok(());
                }
            }
        }
    }
}

fn prompt_for_id(label: &str) -> Result<Option<i64>> {
    let input = prompt_for_input(label)?;
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| anyhow!("Not a numeric id: {}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_option_roundtrip() {
        for opt in MenuOption::ALL {
            let label = opt.label();
            let recovered = MenuOption::from_label(label);
            assert_eq!(recovered, Some(*opt), "Failed roundtrip for {:?}", opt);
        }
    }

    #[test]
    fn test_menu_option_from_invalid_label() {
        assert_eq!(MenuOption::from_label("Invalid"), None);
        assert_eq!(MenuOption::from_label(""), None);
    }

    #[test]
    fn test_menu_option_all_has_correct_count() {
        assert_eq!(MenuOption::ALL.len(), 10);
    }
}
