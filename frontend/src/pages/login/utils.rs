pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Please enter your email address.".into());
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid email address.".into());
    }
    if password.is_empty() {
        return Err("Please enter your password.".into());
    }
    Ok(())
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please enter your name.".into());
    }
    validate_credentials(email, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Passwords must be at least {} characters.",
            MIN_PASSWORD_LEN
        ));
    }
    if password != confirm {
        return Err("Passwords do not match.".into());
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_email_and_password() {
        assert!(validate_credentials("", "x").is_err());
        assert!(validate_credentials("not-an-email", "x").is_err());
        assert!(validate_credentials("a@example.com", "").is_err());
        assert!(validate_credentials(" a@example.com ", "secret").is_ok());
    }

    #[test]
    fn registration_checks_length_and_confirmation() {
        assert!(validate_registration("", "a@example.com", "longenough", "longenough").is_err());
        assert!(validate_registration("Ann", "a@example.com", "short", "short").is_err());
        assert_eq!(
            validate_registration("Ann", "a@example.com", "longenough", "different"),
            Err("Passwords do not match.".to_string())
        );
        assert!(validate_registration("Ann", "a@example.com", "longenough", "longenough").is_ok());
    }
}
