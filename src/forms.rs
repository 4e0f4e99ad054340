//! ═══════════════════════════════════════════════════════════════════════════════
//! FORMS — Register and Login
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Neither form talks to anything: a successful submit returns the accepted
//! values and logs them locally. Passwords never leave the form.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::Serialize;

use crate::error::ValidationError;

/// Mask character for hidden passwords
const MASK: char = '•';

/// Render `value` as typed or masked
pub fn masked(value: &str, reveal: bool) -> String {
    if reveal {
        value.to_string()
    } else {
        std::iter::repeat(MASK).take(value.chars().count()).collect()
    }
}

/// Minimal shape check: `local@domain`, no whitespace
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyField("email"));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(ValidationError::MalformedEmail(email.to_string())),
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    FullName,
    Email,
    Password,
    Confirm,
}

impl RegisterField {
    pub const ALL: [RegisterField; 4] = [
        RegisterField::FullName,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::Confirm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegisterField::FullName => "Full Name",
            RegisterField::Email => "Email",
            RegisterField::Password => "Password",
            RegisterField::Confirm => "Confirm Password",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            RegisterField::FullName => "Dwi Rahma",
            RegisterField::Email => "abcd@gmail.com",
            RegisterField::Password | RegisterField::Confirm => "••••••••",
        }
    }
}

/// Accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub show_password: bool,
    pub show_confirm: bool,
    focus: RegisterField,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both passwords non-empty and equal
    pub fn passwords_match(&self) -> bool {
        !self.password.is_empty() && !self.confirm.is_empty() && self.password == self.confirm
    }

    /// Submit control is enabled only while the passwords match
    pub fn can_submit(&self) -> bool {
        self.passwords_match()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.full_name, "full name")?;
        validate_email(&self.email)?;
        require(&self.password, "password")?;
        if !self.passwords_match() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn submit(&self) -> Result<Registration, ValidationError> {
        self.validate()?;
        let registration = Registration {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        tracing::info!(
            full_name = %registration.full_name,
            email = %registration.email,
            "registration submitted (local only)"
        );
        Ok(registration)
    }

    pub fn focus(&self) -> RegisterField {
        self.focus
    }

    pub fn set_focus(&mut self, field: RegisterField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        let i = RegisterField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = RegisterField::ALL[(i + 1) % RegisterField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let n = RegisterField::ALL.len();
        let i = RegisterField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = RegisterField::ALL[(i + n - 1) % n];
    }

    pub fn field_mut(&mut self, field: RegisterField) -> &mut String {
        match field {
            RegisterField::FullName => &mut self.full_name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        }
    }

    pub fn field(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::FullName => &self.full_name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::Confirm => &self.confirm,
        }
    }

    /// Field text as it should be drawn
    pub fn display(&self, field: RegisterField) -> String {
        match field {
            RegisterField::Password => masked(&self.password, self.show_password),
            RegisterField::Confirm => masked(&self.confirm, self.show_confirm),
            _ => self.field(field).to_string(),
        }
    }

    pub fn input(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
    }

    /// Show/hide toggle for the focused password field
    pub fn toggle_reveal(&mut self) {
        match self.focus {
            RegisterField::Password => self.show_password = !self.show_password,
            RegisterField::Confirm => self.show_confirm = !self.show_confirm,
            _ => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOGIN
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Remember,
}

impl LoginField {
    pub const ALL: [LoginField; 3] = [LoginField::Email, LoginField::Password, LoginField::Remember];

    pub fn label(&self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
            LoginField::Remember => "Remember me",
        }
    }
}

/// Accepted login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Login {
    pub email: String,
    pub remember: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
    pub show_password: bool,
    focus: LoginField,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn submit(&self) -> Result<Login, ValidationError> {
        validate_email(&self.email)?;
        require(&self.password, "password")?;
        let login = Login {
            email: self.email.trim().to_string(),
            remember: self.remember,
        };
        tracing::info!(email = %login.email, remember = login.remember, "login submitted (local only)");
        Ok(login)
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        let i = LoginField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = LoginField::ALL[(i + 1) % LoginField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let n = LoginField::ALL.len();
        let i = LoginField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = LoginField::ALL[(i + n - 1) % n];
    }

    pub fn display(&self, field: LoginField) -> String {
        match field {
            LoginField::Email => self.email.clone(),
            LoginField::Password => masked(&self.password, self.show_password),
            LoginField::Remember => if self.remember { "[x]" } else { "[ ]" }.to_string(),
        }
    }

    /// Typed characters go to text fields; space toggles the checkbox
    pub fn input(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Remember if c == ' ' => self.remember = !self.remember,
            LoginField::Remember => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Remember => {}
        }
    }

    pub fn toggle_reveal(&mut self) {
        self.show_password = !self.show_password;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            full_name: "Dwi Rahma".into(),
            email: "abcd@gmail.com".into(),
            password: password.into(),
            confirm: confirm.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mismatched_passwords_disable_submit() {
        let form = filled("abc123", "abc124");
        assert!(!form.can_submit());
        assert_eq!(form.submit(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_matching_passwords_enable_submit() {
        let form = filled("abc123", "abc123");
        assert!(form.can_submit());
        let registration = form.submit().unwrap();
        assert_eq!(registration.email, "abcd@gmail.com");
    }

    #[test]
    fn test_empty_passwords_never_match() {
        assert!(!filled("", "").can_submit());
        assert!(!filled("abc", "").can_submit());
    }

    #[test]
    fn test_register_requires_fields() {
        let mut form = filled("abc123", "abc123");
        form.full_name.clear();
        assert_eq!(form.submit(), Err(ValidationError::EmptyField("full name")));

        let mut form = filled("abc123", "abc123");
        form.email = "not-an-email".into();
        assert!(matches!(form.submit(), Err(ValidationError::MalformedEmail(_))));
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut form = RegisterForm::new();
        "Dwi".chars().for_each(|c| form.input(c));
        form.focus_next();
        form.focus_next();
        "pw".chars().for_each(|c| form.input(c));
        form.backspace();
        assert_eq!(form.full_name, "Dwi");
        assert_eq!(form.password, "p");
        assert_eq!(form.display(RegisterField::Password), "•");
        form.toggle_reveal();
        assert_eq!(form.display(RegisterField::Password), "p");
        form.focus_prev();
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focus(), RegisterField::Confirm);
    }

    #[test]
    fn test_login_flow() {
        let mut form = LoginForm::new();
        assert!(!form.can_submit());
        "abcd@gmail.com".chars().for_each(|c| form.input(c));
        form.focus_next();
        "secret".chars().for_each(|c| form.input(c));
        form.focus_next();
        form.input(' ');
        assert!(form.can_submit());
        let login = form.submit().unwrap();
        assert!(login.remember);
        assert_eq!(form.display(LoginField::Password), "••••••");
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("@b").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a b@c").is_err());
        assert_eq!(validate_email("  "), Err(ValidationError::EmptyField("email")));
    }
}
