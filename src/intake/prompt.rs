use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use super::{validate_identity, Field, FieldError, Identity, IdentityForm};
use crate::quiz::Language;

/// Prompt with a message and return the trimmed input line.
///
/// Fails on end of input so callers that loop until valid cannot spin forever.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt with a default value. Returns the default if input is empty.
pub fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt(input, output, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Prompt with a yes/no question.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

fn set_field(form: &mut IdentityForm, field: Field, value: String) {
    match field {
        Field::FirstName => form.first_name = value,
        Field::LastName => form.last_name = value,
        Field::MobileNumber => form.mobile_number = value,
        Field::Country => form.country = value,
        Field::City => form.city = value,
    }
}

/// Ask for every identity field, then re-ask only the rejected ones until the
/// form validates.
pub fn run_intake<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    lang: Language,
) -> Result<Identity> {
    writeln!(
        output,
        "{}",
        lang.pick(
            "Please enter your details to start the test.",
            "لطفاً برای شروع تست اطلاعات خود را وارد کنید."
        )
    )?;

    let mut form = IdentityForm::default();
    let mut pending: Vec<Field> = Field::ALL.to_vec();

    loop {
        for field in &pending {
            let value = prompt(input, output, &format!("{}: ", field.label(lang)))?;
            set_field(&mut form, *field, value);
        }

        match validate_identity(&form) {
            Ok(identity) => return Ok(identity),
            Err(errors) => {
                for error in &errors {
                    writeln!(output, "  {}", error.message(lang))?;
                }
                pending = errors.iter().map(FieldError::field).collect();
                tracing::debug!(count = errors.len(), "identity form rejected");
            }
        }
    }
}
