//! One-shot contact commands.
//!
//! Each command drives the same [`ContactBook`] state the interactive view
//! uses, so validation, confirmation and error messages are identical.

#![allow(clippy::print_stdout)]

use contact_book_client::{ClientError, ContactApi, ContactBook, ContactDraft, HttpContactApi};
use contact_book_core::ContactId;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::ui;

/// Errors reported by the contact commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The view recorded an error for the action.
    #[error("{0}")]
    Failed(String),

    /// A direct API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The confirmation prompt could not be read.
    #[error("Prompt error: {0}")]
    Prompt(#[from] ReadlineError),
}

/// Convert the view's visible error (if any) into a command failure.
fn check<A: ContactApi>(book: &ContactBook<A>) -> Result<(), CommandError> {
    match book.error() {
        Some(message) => Err(CommandError::Failed(message.to_string())),
        None => Ok(()),
    }
}

/// `cb-cli list`
pub async fn list(api: HttpContactApi) -> Result<(), CommandError> {
    let mut book = ContactBook::new(api);
    book.load().await;
    check(&book)?;

    println!("{}", ui::render_list(&book));
    Ok(())
}

/// `cb-cli show <id>`
pub async fn show(api: &HttpContactApi, id: ContactId) -> Result<(), CommandError> {
    let contact = api.get(id).await?;
    println!("{}", ui::render_detail(&contact));
    Ok(())
}

/// `cb-cli add ...`
pub async fn add(api: HttpContactApi, draft: ContactDraft) -> Result<(), CommandError> {
    let mut book = ContactBook::new(api);
    book.set_draft(draft);

    match book.submit().await {
        Some(contact) => {
            println!("Created contact #{}", contact.id);
            println!("{}", ui::render_detail(&contact));
            Ok(())
        }
        None => Err(CommandError::Failed(
            book.error().unwrap_or_default().to_string(),
        )),
    }
}

/// `cb-cli update <id> ...`
pub async fn update(
    api: HttpContactApi,
    id: ContactId,
    draft: ContactDraft,
) -> Result<(), CommandError> {
    let current = api.get(id).await?;

    let mut book = ContactBook::new(api);
    book.begin_edit(&current);
    book.set_draft(draft);

    match book.submit().await {
        Some(contact) => {
            println!("Updated contact #{}", contact.id);
            println!("{}", ui::render_detail(&contact));
            Ok(())
        }
        None => Err(CommandError::Failed(
            book.error().unwrap_or_default().to_string(),
        )),
    }
}

/// `cb-cli delete <id> [--yes]`
pub async fn delete(api: HttpContactApi, id: ContactId, yes: bool) -> Result<(), CommandError> {
    let mut book = ContactBook::new(api);

    let deleted = if yes {
        book.delete(id, &mut |_: &str| true).await
    } else {
        let mut editor = DefaultEditor::new()?;
        book.delete(id, &mut |prompt: &str| ui::confirm_with(&mut editor, prompt))
            .await
    };

    check(&book)?;
    if deleted {
        println!("Contact #{id} deleted");
    } else {
        println!("Cancelled");
    }
    Ok(())
}
