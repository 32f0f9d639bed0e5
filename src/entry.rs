//! The income and expense entry forms.
//!
//! A form holds the raw text of its two fields. Submitting it validates the amount, forces the
//! sign that belongs to the form and clears the fields. Input that is not a finite number is
//! rejected here so that it never reaches the budget.

use crate::model::{Amount, NavTab};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::str::FromStr;

/// The two entry forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Expense,
    Income,
}

impl From<NavTab> for Form {
    fn from(tab: NavTab) -> Self {
        match tab {
            NavTab::Expense => Form::Expense,
            NavTab::Income => Form::Income,
        }
    }
}

/// The input fields every form has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Amount,
    Category,
}

/// What a successful submission hands to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub sum: Amount,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    form: Form,
    amount: String,
    category: String,
}

impl EntryForm {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            amount: String::new(),
            category: String::new(),
        }
    }

    pub fn set(&mut self, field: EntryField, value: impl Into<String>) {
        let slot = match field {
            EntryField::Amount => &mut self.amount,
            EntryField::Category => &mut self.category,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Amount => &self.amount,
            EntryField::Category => &self.category,
        }
    }

    /// Validates the amount and produces the signed submission. Expenses are always negative and
    /// income is always positive, whatever sign was typed. On error the fields are left as they
    /// were so the user can correct them.
    pub fn submit(&mut self) -> Result<Submission> {
        let parsed = Amount::from_str(&self.amount)
            .with_context(|| format!("Cannot record this {} amount", self.form_name()))?;
        let sum = match self.form {
            Form::Expense => -parsed.abs(),
            Form::Income => parsed.abs(),
        };
        let submission = Submission {
            sum,
            category: std::mem::take(&mut self.category),
        };
        self.amount.clear();
        Ok(submission)
    }

    fn form_name(&self) -> &'static str {
        match self.form {
            Form::Expense => "expense",
            Form::Income => "income",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(form: Form, amount: &str, category: &str) -> EntryForm {
        let mut entry = EntryForm::new(form);
        entry.set(EntryField::Amount, amount);
        entry.set(EntryField::Category, category);
        entry
    }

    #[test]
    fn test_expense_is_forced_negative() {
        let mut entry = filled(Form::Expense, "200", "food");
        let submission = entry.submit().unwrap();
        assert_eq!(submission.sum, Amount::new(-200.0));
        assert_eq!(submission.category, "food");

        let mut entry = filled(Form::Expense, "-15.5", "");
        assert_eq!(entry.submit().unwrap().sum, Amount::new(-15.5));
    }

    #[test]
    fn test_income_is_forced_positive() {
        let mut entry = filled(Form::Income, "3000", "salary");
        assert_eq!(entry.submit().unwrap().sum, Amount::new(3000.0));

        let mut entry = filled(Form::Income, "-3000", "salary");
        assert_eq!(entry.submit().unwrap().sum, Amount::new(3000.0));
    }

    #[test]
    fn test_submit_clears_fields() {
        let mut entry = filled(Form::Expense, "5", "coffee");
        entry.submit().unwrap();
        assert_eq!(entry.get(EntryField::Amount), "");
        assert_eq!(entry.get(EntryField::Category), "");
    }

    #[test]
    fn test_empty_category_is_allowed() {
        let mut entry = filled(Form::Income, "10", "");
        assert_eq!(entry.submit().unwrap().category, "");
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let mut entry = filled(Form::Expense, "a lot", "rent");
        let err = entry.submit().unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Cannot record this expense amount: 'a lot' is not a number"
        );
        // Nothing is lost
        assert_eq!(entry.get(EntryField::Amount), "a lot");
        assert_eq!(entry.get(EntryField::Category), "rent");
    }

    #[test]
    fn test_empty_and_nan_amounts_are_rejected() {
        assert!(filled(Form::Income, "", "x").submit().is_err());
        assert!(filled(Form::Income, "NaN", "x").submit().is_err());
        assert!(filled(Form::Expense, "inf", "x").submit().is_err());
    }

    #[test]
    fn test_form_from_tab() {
        assert_eq!(Form::from(NavTab::Expense), Form::Expense);
        assert_eq!(Form::from(NavTab::Income), Form::Income);
    }
}
