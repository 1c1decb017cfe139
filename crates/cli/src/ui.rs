//! Interactive terminal view: one form, one list.
//!
//! The screen is redrawn from [`ContactBook`] after every command. Form
//! fields are edited with line-editor prompts prefilled from the draft, so
//! after a failed submit `retry` starts from what was typed.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use contact_book_client::{ContactApi, ContactBook, HttpContactApi};
use contact_book_core::{Contact, ContactField, ContactId};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const TITLE: &str = "Simple CRM";
const EMPTY_LIST: &str = "No contacts yet. Add your first contact above!";
const LOADING: &str = "Loading contacts...";

const HELP: &str = "\
Commands:
  add            Fill in the form and create a contact
  edit <id>      Load a contact into the form and update it
  retry          Re-open the form with the current values and submit
  cancel         Clear the form
  delete <id>    Delete a contact (asks for confirmation)
  refresh        Fetch the list again
  help           Show this help
  quit           Leave";

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add,
    Edit(ContactId),
    Retry,
    Cancel,
    Delete(ContactId),
    Refresh,
    Help,
    Quit,
    Nothing,
}

/// Parse one line typed at the prompt.
fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Nothing);
    };

    let mut id = || -> Result<ContactId, String> {
        let raw = words
            .next()
            .ok_or_else(|| format!("Usage: {verb} <id>"))?;
        raw.parse()
            .map_err(|_| format!("Not a contact id: {raw}"))
    };

    let command = match verb.to_lowercase().as_str() {
        "add" | "new" => Command::Add,
        "edit" => Command::Edit(id()?),
        "retry" | "submit" => Command::Retry,
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete(id()?),
        "refresh" | "list" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command: {other} (type 'help')")),
    };
    Ok(command)
}

/// One list line: id, full name, phone.
fn render_row(contact: &Contact) -> String {
    format!("#{:<5} {:<30} {}", contact.id, contact.full_name(), contact.phone)
}

/// The list section of the view.
pub fn render_list<A: ContactApi>(book: &ContactBook<A>) -> String {
    let mut out = String::from("Contacts\n--------\n");

    if book.is_loading() {
        out.push_str(LOADING);
    } else if book.contacts().is_empty() {
        out.push_str(EMPTY_LIST);
    } else {
        let rows: Vec<String> = book.contacts().iter().map(render_row).collect();
        out.push_str(&rows.join("\n"));
    }
    out
}

/// A single contact, one field per line.
pub fn render_detail(contact: &Contact) -> String {
    format!(
        "ID:         {}\nFirst Name: {}\nLast Name:  {}\nPhone:      {}\nCreated:    {}",
        contact.id,
        contact.first_name,
        contact.last_name,
        contact.phone,
        contact.created_at.to_rfc3339()
    )
}

/// The whole screen: title, error, form, list.
fn render<A: ContactApi>(book: &ContactBook<A>) -> String {
    let mut out = format!("{TITLE}\n{}\n", "=".repeat(TITLE.len()));

    if let Some(error) = book.error() {
        let _ = writeln!(out, "Error: {error}");
    }

    out.push('\n');
    match book.editing() {
        Some(id) => {
            let _ = writeln!(out, "Edit Contact #{id}");
        }
        None => out.push_str("Add New Contact\n"),
    }
    for field in ContactField::ALL {
        let _ = writeln!(out, "  {:<11} {}", format!("{}:", field.label()), book.draft().get(field));
    }

    out.push('\n');
    out.push_str(&render_list(book));
    out
}

/// Ask a yes/no question; anything but an explicit yes declines.
pub fn confirm_with(editor: &mut DefaultEditor, prompt: &str) -> bool {
    match editor.readline(&format!("{prompt} [y/N] ")) {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Prompt for each form field, prefilled from the draft.
///
/// Returns `false` if the user aborted with Ctrl-C or Ctrl-D.
fn edit_form<A: ContactApi>(
    editor: &mut DefaultEditor,
    book: &mut ContactBook<A>,
) -> Result<bool, ReadlineError> {
    for field in ContactField::ALL {
        let prompt = format!("{}: ", field.label());
        let value = match editor.readline_with_initial(&prompt, (book.draft().get(field), "")) {
            Ok(value) => value,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e),
        };
        book.set_field(field, value);
    }
    Ok(true)
}

/// Run the interactive view until the user quits.
///
/// # Errors
///
/// Returns `ReadlineError` if the terminal cannot be read.
pub async fn run(api: HttpContactApi) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    let mut book = ContactBook::new(api);

    book.load().await;
    println!("{}\n\nType 'help' for commands.", render(&book));

    loop {
        let line = match editor.readline("contacts> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };
        let _ = editor.add_history_entry(line.as_str());

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Nothing => continue,
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Add => {
                book.cancel();
                if edit_form(&mut editor, &mut book)? {
                    book.submit().await;
                }
            }
            Command::Edit(id) => {
                let Some(contact) = book.contact(id).cloned() else {
                    println!("No contact #{id} in the list");
                    continue;
                };
                book.begin_edit(&contact);
                if edit_form(&mut editor, &mut book)? {
                    book.submit().await;
                }
            }
            Command::Retry => {
                if edit_form(&mut editor, &mut book)? {
                    book.submit().await;
                }
            }
            Command::Cancel => book.cancel(),
            Command::Delete(id) => {
                book.delete(id, &mut |prompt: &str| confirm_with(&mut editor, prompt))
                    .await;
            }
            Command::Refresh => book.load().await,
        }

        println!("\n{}", render(&book));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use contact_book_client::ClientError;
    use contact_book_core::ContactFields;

    use super::*;

    /// API stub serving a fixed list; writes are never issued by these tests.
    struct StaticApi(Vec<Contact>);

    fn unreachable() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "Internal server error".to_string(),
        }
    }

    impl ContactApi for StaticApi {
        async fn list(&self) -> Result<Vec<Contact>, ClientError> {
            Ok(self.0.clone())
        }

        async fn get(&self, _id: ContactId) -> Result<Contact, ClientError> {
            Err(unreachable())
        }

        async fn create(&self, _fields: &ContactFields) -> Result<Contact, ClientError> {
            Err(unreachable())
        }

        async fn update(
            &self,
            _id: ContactId,
            _fields: &ContactFields,
        ) -> Result<Contact, ClientError> {
            Err(unreachable())
        }

        async fn delete(&self, _id: ContactId) -> Result<String, ClientError> {
            Err(unreachable())
        }
    }

    fn jane() -> Contact {
        Contact {
            id: ContactId::new(4),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: "555-1212".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("add"), Ok(Command::Add));
        assert_eq!(parse_command("  edit 4 "), Ok(Command::Edit(ContactId::new(4))));
        assert_eq!(parse_command("DELETE 9"), Ok(Command::Delete(ContactId::new(9))));
        assert_eq!(parse_command(""), Ok(Command::Nothing));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert_eq!(parse_command("edit"), Err("Usage: edit <id>".to_string()));
        assert_eq!(
            parse_command("delete abc"),
            Err("Not a contact id: abc".to_string())
        );
        assert!(parse_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_render_loading_then_empty() {
        let mut book = ContactBook::new(StaticApi(Vec::new()));
        assert!(render_list(&book).contains(LOADING));

        book.load().await;
        let screen = render(&book);
        assert!(screen.starts_with(TITLE));
        assert!(screen.contains("Add New Contact"));
        assert!(screen.contains(EMPTY_LIST));
        assert!(!screen.contains("Error:"));
    }

    #[tokio::test]
    async fn test_render_list_and_edit_form() {
        let mut book = ContactBook::new(StaticApi(vec![jane()]));
        book.load().await;
        book.begin_edit(&jane());

        let screen = render(&book);
        assert!(screen.contains("Edit Contact #4"));
        assert!(screen.contains("First Name: Jane"));
        assert!(screen.contains("#4"));
        assert!(screen.contains("Jane Doe"));
        assert!(screen.contains("555-1212"));
    }

    #[tokio::test]
    async fn test_render_shows_error_and_keeps_draft() {
        let mut book = ContactBook::new(StaticApi(Vec::new()));
        book.load().await;
        book.set_field(ContactField::FirstName, "Jane");
        book.set_field(ContactField::LastName, "Doe");
        book.set_field(ContactField::Phone, "555-1212");

        assert!(book.submit().await.is_none());

        let screen = render(&book);
        assert!(screen.contains("Error: Failed to add contact"));
        assert!(screen.contains("Phone:      555-1212"));
    }

    #[test]
    fn test_render_detail() {
        let detail = render_detail(&jane());
        assert!(detail.contains("ID:         4"));
        assert!(detail.contains("Last Name:  Doe"));
        assert!(detail.contains("2026-01-02T03:04:05+00:00"));
    }
}
