//! HTML form payloads and their explicit decode and validation steps.
//!
//! Each form has a raw `*Input` shape that mirrors the urlencoded body with
//! every field optional, a decode function that produces the typed form, and
//! a `validate` method that fills the embedded [`Validator`]. Typed forms are
//! serialised into the template context so an invalid submission can be
//! re-displayed with its messages.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::validator::{
    email_regex, matches, max_chars, min_chars, not_blank, permitted_value,
};
use crate::domain::{Error, LoginCredentials, NewAccount, NewSnippet, PERMITTED_EXPIRY_DAYS, Validator};

pub const BLANK_MESSAGE: &str = "This field cannot be blank";
pub const TITLE_TOO_LONG_MESSAGE: &str = "This field cannot be more than 100 characters long";
pub const FIELD_TOO_LONG_MESSAGE: &str = "This field cannot be more than 255 characters long";
pub const EXPIRES_MESSAGE: &str = "This field must equal 1, 7 or 365";
pub const EMAIL_MESSAGE: &str = "This field must be a valid email address";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "This field must be at least 8 characters long";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email address is already in use";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is incorrect";

const TITLE_MAX_CHARS: usize = 100;
/// Width of the `users.name` and `users.email` columns.
const ACCOUNT_FIELD_MAX_CHARS: usize = 255;
const PASSWORD_MIN_CHARS: usize = 8;
const DEFAULT_EXPIRES_DAYS: i32 = 365;

/// Raw body of `POST /snippet/create`.
#[derive(Debug, Default, Deserialize)]
pub struct SnippetCreateInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub expires: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Snippet form with typed expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(flatten)]
    pub validator: Validator,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: DEFAULT_EXPIRES_DAYS,
            validator: Validator::default(),
        }
    }
}

/// Decode the raw snippet body.
///
/// # Errors
///
/// An invalid-request error when `expires` is not an integer; the submission
/// is malformed rather than invalid, so it never reaches validation.
pub fn decode_snippet_create(input: SnippetCreateInput) -> Result<SnippetCreateForm, Error> {
    let expires = input
        .expires
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::invalid_request(format!("expires is not an integer: {:?}", input.expires)))?;
    Ok(SnippetCreateForm {
        title: input.title,
        content: input.content,
        expires,
        validator: Validator::default(),
    })
}

impl SnippetCreateForm {
    /// Run every field check. Returns `true` when the form is valid.
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.title), "title", BLANK_MESSAGE);
        v.check_field(max_chars(&self.title, TITLE_MAX_CHARS), "title", TITLE_TOO_LONG_MESSAGE);
        v.check_field(not_blank(&self.content), "content", BLANK_MESSAGE);
        v.check_field(
            permitted_value(&self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            EXPIRES_MESSAGE,
        );
        v.valid()
    }

    pub fn to_new_snippet(&self) -> NewSnippet {
        NewSnippet {
            title: self.title.clone(),
            content: self.content.clone(),
            expires_in_days: self.expires,
        }
    }
}

/// Raw body of `POST /user/signup`.
#[derive(Debug, Default, Deserialize)]
pub struct UserSignupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Signup form. The password is never echoed back to the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSignupForm {
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: Zeroizing<String>,
    #[serde(flatten)]
    pub validator: Validator,
}

pub fn decode_user_signup(input: UserSignupInput) -> UserSignupForm {
    UserSignupForm {
        name: input.name,
        email: input.email,
        password: Zeroizing::new(input.password),
        validator: Validator::default(),
    }
}

impl UserSignupForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.name), "name", BLANK_MESSAGE);
        v.check_field(
            max_chars(self.name.trim(), ACCOUNT_FIELD_MAX_CHARS),
            "name",
            FIELD_TOO_LONG_MESSAGE,
        );
        v.check_field(not_blank(&self.email), "email", BLANK_MESSAGE);
        v.check_field(
            max_chars(self.email.trim(), ACCOUNT_FIELD_MAX_CHARS),
            "email",
            FIELD_TOO_LONG_MESSAGE,
        );
        v.check_field(matches(self.email.trim(), email_regex()), "email", EMAIL_MESSAGE);
        v.check_field(not_blank(&self.password), "password", BLANK_MESSAGE);
        v.check_field(
            min_chars(&self.password, PASSWORD_MIN_CHARS),
            "password",
            PASSWORD_TOO_SHORT_MESSAGE,
        );
        v.valid()
    }

    pub fn to_new_account(&self) -> NewAccount {
        NewAccount::new(&self.name, &self.email, &self.password)
    }
}

/// Raw body of `POST /user/login`.
#[derive(Debug, Default, Deserialize)]
pub struct UserLoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Login form. The password is never echoed back to the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserLoginForm {
    pub email: String,
    #[serde(skip)]
    pub password: Zeroizing<String>,
    #[serde(flatten)]
    pub validator: Validator,
}

pub fn decode_user_login(input: UserLoginInput) -> UserLoginForm {
    UserLoginForm {
        email: input.email,
        password: Zeroizing::new(input.password),
        validator: Validator::default(),
    }
}

impl UserLoginForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.email), "email", BLANK_MESSAGE);
        v.check_field(matches(self.email.trim(), email_regex()), "email", EMAIL_MESSAGE);
        v.check_field(not_blank(&self.password), "password", BLANK_MESSAGE);
        v.valid()
    }

    pub fn to_credentials(&self) -> LoginCredentials {
        LoginCredentials::new(&self.email, &self.password)
    }
}

/// Raw body of `POST /user/logout`.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutInput {
    #[serde(default)]
    pub csrf_token: String,
}
