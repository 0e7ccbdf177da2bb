//! Account inputs handed from inbound forms to the account service.
//!
//! Field-level validation happens in the form layer; these types only carry
//! values that already passed it. Passwords are zeroised on drop.

use zeroize::Zeroizing;

/// Credentials submitted to the login form.
///
/// # Examples
/// ```
/// use snippetbox::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("  alice@example.com ", "pa55word");
/// assert_eq!(creds.email(), "alice@example.com");
/// assert_eq!(creds.password(), "pa55word");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials, trimming surrounding whitespace from the email.
    ///
    /// The password keeps caller-provided whitespace.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Email used to look the account up.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signup request for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Build a signup request, trimming name and email.
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Display name for the account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unique email for the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password to be hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice@example.com", "alice@example.com")]
    #[case("  alice@example.com\t", "alice@example.com")]
    fn login_email_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(LoginCredentials::new(raw, "pw").email(), expected);
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let account = NewAccount::new(" Alice ", "a@example.com", " secret pass ");
        assert_eq!(account.name(), "Alice");
        assert_eq!(account.password(), " secret pass ");
    }
}
