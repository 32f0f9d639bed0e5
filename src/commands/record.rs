//! Record command handlers.

use crate::args::EntryArgs;
use crate::commands::{open_store, Out};
use crate::entry::{EntryField, EntryForm, Form, Submission};
use crate::error::{ErrorType, IntoResult};
use crate::model::Amount;
use crate::{date, Config, Result};

/// Records an expense on the selected date through the expense form.
pub async fn expense(config: Config, args: EntryArgs) -> Result<Out<Submission>> {
    record(config, Some(Form::Expense), args).await
}

/// Records income on the selected date through the income form.
pub async fn income(config: Config, args: EntryArgs) -> Result<Out<Submission>> {
    record(config, Some(Form::Income), args).await
}

/// Records a transaction through whichever form is currently active.
pub async fn add(config: Config, args: EntryArgs) -> Result<Out<Submission>> {
    record(config, None, args).await
}

/// Fills the form, submits it and forwards the result to the store.
///
/// # Errors
///
/// - Returns a validation error if the amount is not a finite number. Nothing is stored then.
/// - Returns an error if the state file cannot be read or written.
async fn record(config: Config, form: Option<Form>, args: EntryArgs) -> Result<Out<Submission>> {
    let mut store = open_store(&config).await?;
    let form = form.unwrap_or_else(|| Form::from(store.state().nav_selected()));

    let mut entry = EntryForm::new(form);
    entry.set(EntryField::Amount, args.amount());
    entry.set(EntryField::Category, args.category());
    let submission = entry.submit().pub_result(ErrorType::Validation)?;

    store
        .insert(submission.sum, submission.category.clone())
        .await
        .pub_result(ErrorType::Storage)?;

    let label = if submission.category.is_empty() {
        String::new()
    } else {
        format!(" ({})", submission.category)
    };
    let message = format!(
        "Recorded {}{label} on {}. Left for today: {}",
        submission.sum,
        date::format(store.date()),
        Amount::new(store.remaining_today())
    );
    Ok(Out::new(message, submission))
}
