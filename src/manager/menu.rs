// Main menu loop

use crate::core::traits::{Console, QueryExecutor};
use crate::manager::crud::{
    handle_create_command, handle_delete_command, handle_update_command, handle_view_command,
};
use crate::utils::error::{handle_flow, report_error, AppError, AppResult, FlowResult};

pub const MENU_PROMPT: &str = "What would you like to do?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewAll,
    Create,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    /// Menu order; the first entry is the default
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::ViewAll,
        MenuChoice::Create,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewAll => "View all contacts",
            MenuChoice::Create => "Create a new contact",
            MenuChoice::Update => "Update an existing contact",
            MenuChoice::Delete => "Delete a contact",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub fn prompt_choice<C: Console + ?Sized>(console: &mut C) -> AppResult<MenuChoice> {
    let labels = MenuChoice::ALL.map(MenuChoice::label);
    let index = console.select(MENU_PROMPT, &labels, 0)?;
    MenuChoice::ALL
        .get(index)
        .copied()
        .ok_or_else(|| AppError::Io(format!("menu choice {} out of range", index)))
}

pub async fn dispatch<E, C>(choice: MenuChoice, db: &mut E, console: &mut C) -> AppResult<FlowResult>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    match choice {
        MenuChoice::ViewAll => handle_view_command(db, console).await,
        MenuChoice::Create => handle_create_command(db, console).await,
        MenuChoice::Update => handle_update_command(db, console).await,
        MenuChoice::Delete => handle_delete_command(db, console).await,
        MenuChoice::Exit => Ok(FlowResult::Success("Goodbye!".to_string())),
    }
}

/// Prompt and dispatch until the user picks Exit.
///
/// Handler failures are reported and the loop goes on; console failures end
/// the loop with an error.
pub async fn run_menu<E, C>(db: &mut E, console: &mut C) -> AppResult<()>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    loop {
        let choice = prompt_choice(console)?;
        println!();

        log::debug!("menu choice: {:?}", choice);
        match dispatch(choice, db, console).await {
            Ok(flow) => handle_flow(flow),
            Err(err @ AppError::Io(_)) => return Err(err),
            Err(err) => report_error(&err),
        }

        if choice == MenuChoice::Exit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ContactDraft;
    use crate::core::operations::{DELETE_CONTACT, INSERT_CONTACT, SELECT_ALL_CONTACTS};
    use crate::testing::{MemoryExecutor, ScriptedConsole};

    #[test]
    fn test_menu_labels_in_order() {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "View all contacts",
                "Create a new contact",
                "Update an existing contact",
                "Delete a contact",
                "Exit",
            ]
        );
    }

    #[test]
    fn test_prompt_choice_defaults_to_view() {
        let mut console = ScriptedConsole::new([""]);
        assert_eq!(prompt_choice(&mut console).unwrap(), MenuChoice::ViewAll);
        assert_eq!(console.prompts, vec![MENU_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_exit_says_goodbye() {
        let mut db = MemoryExecutor::new();
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let flow = dispatch(MenuChoice::Exit, &mut db, &mut console).await.unwrap();

        assert_eq!(flow, FlowResult::Success("Goodbye!".to_string()));
        assert!(db.statements().is_empty());
    }

    #[tokio::test]
    async fn test_exit_immediately_issues_no_query() {
        let mut db = MemoryExecutor::new();
        let mut console = ScriptedConsole::new(["Exit"]);

        run_menu(&mut db, &mut console).await.unwrap();

        assert!(db.statements().is_empty());
    }

    #[tokio::test]
    async fn test_loop_runs_handlers_until_exit() {
        let mut db = MemoryExecutor::new();
        let mut console = ScriptedConsole::new([
            "Create a new contact",
            "Ann",
            "Lee",
            "555-1111",
            "ann@x.com",
            "",
            "View all contacts",
            "Delete a contact",
            "1",
            "Exit",
        ]);

        run_menu(&mut db, &mut console).await.unwrap();

        assert_eq!(console.remaining(), 0);
        assert_eq!(db.issued(INSERT_CONTACT), 1);
        assert_eq!(db.issued(SELECT_ALL_CONTACTS), 1);
        assert_eq!(db.issued(DELETE_CONTACT), 1);
        assert_eq!(db.len(), 0);
    }

    #[tokio::test]
    async fn test_handler_failures_do_not_end_loop() {
        let mut db = MemoryExecutor::new();
        db.seed(1, &ContactDraft::default());
        let mut console = ScriptedConsole::new([
            "Update an existing contact",
            "not-a-number",
            "Delete a contact",
            "99",
            "Exit",
        ]);

        run_menu(&mut db, &mut console).await.unwrap();

        assert_eq!(console.remaining(), 0);
        assert_eq!(db.len(), 1);
    }

    #[tokio::test]
    async fn test_query_failure_does_not_end_loop() {
        let mut db = MemoryExecutor::new();
        db.fail_with("server closed the connection unexpectedly");
        let mut console = ScriptedConsole::new(["View all contacts", "View all contacts", "Exit"]);

        run_menu(&mut db, &mut console).await.unwrap();

        assert_eq!(db.issued(SELECT_ALL_CONTACTS), 2);
    }

    #[tokio::test]
    async fn test_closed_console_ends_loop() {
        let mut db = MemoryExecutor::new();
        let mut console = ScriptedConsole::new(["Create a new contact", "Ann"]);

        let err = run_menu(&mut db, &mut console).await.unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
        assert!(db.statements().is_empty());
    }
}
