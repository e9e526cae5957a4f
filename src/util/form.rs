//! Client-side checks for the login and signup forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validated signup form values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns the message to show next to the form.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = check_email(email)?;
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// # Errors
///
/// Returns the message for the first failing field, in form order.
pub fn validate_signup(
    display_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<SignupInput, &'static str> {
    let email = check_email(email)?;
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters long");
    }
    if confirm.is_empty() {
        return Err("Please confirm your password");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    let display_name = Some(display_name.trim()).filter(|n| !n.is_empty()).map(str::to_owned);
    Ok(SignupInput { email: email.to_owned(), password: password.to_owned(), display_name })
}

fn check_email(email: &str) -> Result<&str, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !is_email_shaped(email) {
        return Err("Please enter a valid email address");
    }
    Ok(email)
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty() && !l.starts_with('-') && !l.ends_with('-'))
}
