use std::fmt;

/// Client-side locations. Anything unrecognised falls back to `Landing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Join,
    Create,
    Room { code: String },
}

impl Route {
    pub fn room(code: impl Into<String>) -> Self {
        Route::Room { code: code.into() }
    }

    pub fn parse(path: &str) -> Self {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["join"] => Route::Join,
            ["create"] => Route::Create,
            ["room", code] => Route::room(*code),
            _ => Route::Landing,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Join => "/join".to_string(),
            Route::Create => "/create".to_string(),
            Route::Room { code } => format!("/room/{}", code),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
