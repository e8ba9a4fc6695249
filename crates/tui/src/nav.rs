/// The client's views. `Form` is the default view after authentication,
/// matching where a successful login lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Reset,
    Form,
    Dashboard,
}

impl Screen {
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Form | Self::Dashboard)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Reset => "Reset password",
            Self::Form => "New transaction",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Route guard, evaluated before every navigation. Pure: anonymous users
/// are sent to the login view, authenticated users are kept away from it.
pub fn resolve(requested: Screen, authenticated: bool) -> Screen {
    if !authenticated && requested.requires_auth() {
        return Screen::Login;
    }
    if authenticated && !requested.requires_auth() {
        return Screen::Form;
    }
    requested
}
