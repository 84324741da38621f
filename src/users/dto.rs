use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::storage::{Collaboration, Id, IdeaWithVotes, User};
use crate::validation::{is_valid_email, is_valid_username, optional_text, Checker, Validate};

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Validated user input; the password is still plain here and gets hashed
/// by the handler before it reaches storage.
#[derive(Debug)]
pub struct UserInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl Validate for CreateUserRequest {
    const KIND: &'static str = "user";
    type Output = UserInput;

    fn validate(self) -> Result<UserInput, Vec<FieldError>> {
        let mut c = Checker::default();

        let username = c.text("username", self.username);
        if !username.is_empty() && !is_valid_username(&username) {
            c.fail(
                "username",
                "Must be 3-32 characters of letters, digits, '.', '_' or '-'",
            );
        }

        let password = match self.password {
            Some(p) if p.chars().count() < 8 => {
                c.fail("password", "Must be at least 8 characters");
                p
            }
            Some(p) => p,
            None => {
                c.fail("password", "Required");
                String::new()
            }
        };

        let name = c.text("name", self.name);
        c.max_len("name", &name, 80);

        let email = c.text("email", self.email).to_lowercase();
        if !email.is_empty() && !is_valid_email(&email) {
            c.fail("email", "Invalid email");
        }

        let skills = self.skills.map(|skills| {
            skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        c.finish(UserInput {
            username,
            password,
            name,
            email,
            avatar: optional_text(self.avatar),
            bio: optional_text(self.bio),
            skills,
        })
    }
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    const KIND: &'static str = "login";
    type Output = Credentials;

    fn validate(self) -> Result<Credentials, Vec<FieldError>> {
        let mut c = Checker::default();
        let username = c.text("username", self.username);
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => {
                c.fail("password", "Required");
                String::new()
            }
        };
        c.finish(Credentials { username, password })
    }
}

/// A user as the API shows it: everything but the password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Id,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            bio: u.bio,
            skills: u.skills,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub ideas: Vec<IdeaWithVotes>,
    pub collaborations: Vec<Collaboration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            username: Some("grace".into()),
            password: Some("hopper1906".into()),
            name: Some(" Grace Hopper ".into()),
            email: Some("Grace@Navy.mil".into()),
            avatar: Some("".into()),
            bio: None,
            skills: Some(vec!["COBOL".into(), " ".into()]),
        }
    }

    #[test]
    fn valid_user_is_normalized() {
        let input = request().validate().unwrap();
        assert_eq!(input.name, "Grace Hopper");
        assert_eq!(input.email, "grace@navy.mil");
        assert_eq!(input.avatar, None);
        assert_eq!(input.skills, Some(vec!["COBOL".to_string()]));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let req = CreateUserRequest {
            username: Some("g r".into()),
            password: Some("short".into()),
            name: None,
            email: Some("nope".into()),
            ..request()
        };
        let errors = req.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.path[0].as_str()).collect();
        assert_eq!(fields, ["username", "password", "name", "email"]);
    }

    #[test]
    fn missing_password_is_required_not_short() {
        let errors = CreateUserRequest {
            password: None,
            ..request()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors, [FieldError::new("password", "Required")]);
    }

    #[test]
    fn login_needs_both_fields() {
        let errors = LoginRequest {
            username: Some("grace".into()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, ["password"]);
    }

    #[test]
    fn public_user_has_no_password() {
        let user = User {
            id: 1,
            username: "grace".into(),
            password_hash: "$argon2id$secret".into(),
            name: "Grace".into(),
            email: "grace@navy.mil".into(),
            avatar: None,
            bio: None,
            skills: None,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("grace@navy.mil"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
