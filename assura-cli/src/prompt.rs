use dialoguer::{Confirm, Input, Select};

use assura_types::customer::CustomerForm;

use crate::error::AppError;

/// Ask the user to confirm an action.
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Free-text input. Empty answers are accepted.
pub fn input(prompt: &str) -> Result<String, AppError> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Pick one of `items`; returns its index.
pub fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize, AppError> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// The three customer form fields.
pub fn customer_form() -> Result<CustomerForm, AppError> {
    Ok(CustomerForm {
        name: input("Name")?,
        age: input("Age")?,
        policy_number: input("Policy number")?,
    })
}

/// Wait for Enter.
pub fn pause() -> Result<(), AppError> {
    Input::<String>::new()
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .report(false)
        .interact_text()?;
    Ok(())
}
