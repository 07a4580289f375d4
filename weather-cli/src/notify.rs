use std::fmt;

/// A user-visible outcome of one command, shown like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification::Success(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notification::Warning(message.into())
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Notification::Error(message.to_string())
    }

    pub fn show(&self) {
        match self {
            Notification::Success(_) => println!("{self}"),
            Notification::Warning(_) | Notification::Error(_) => eprintln!("{self}"),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Success(msg) => write!(f, "✔ {msg}"),
            Notification::Warning(msg) => write!(f, "! {msg}"),
            Notification::Error(msg) => write!(f, "✖ {msg}"),
        }
    }
}
