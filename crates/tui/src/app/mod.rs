use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    Currency, PartyKind, PaymentMethod,
    transaction::{NewTransaction, Party},
};

use crate::{
    client::ApiClient,
    config::AppConfig,
    error::{AppError, Result},
    nav::{self, Screen},
    session::{SessionStore, token_file::TokenFile},
    transactions::TransactionStore,
    ui,
};

/// A status line under a form. Notices render in the success colour,
/// errors in the error colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Notice(String),
    Error(String),
}

impl Feedback {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Notice(text) | Self::Error(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<Feedback>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    RequestCode,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetField {
    Username,
    Code,
    NewPassword,
}

#[derive(Debug)]
pub struct ResetForm {
    pub username: String,
    pub code: String,
    pub new_password: String,
    pub stage: ResetStage,
    pub focus: ResetField,
    pub message: Option<Feedback>,
}

impl ResetForm {
    fn advance_focus(&mut self) {
        self.focus = match (self.stage, self.focus) {
            (ResetStage::RequestCode, _) => ResetField::Username,
            (ResetStage::Confirm, ResetField::Code) => ResetField::NewPassword,
            (ResetStage::Confirm, _) => ResetField::Code,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            ResetField::Username => &mut self.username,
            ResetField::Code => &mut self.code,
            ResetField::NewPassword => &mut self.new_password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ReceiverName,
    ReceiverId,
    ReceiverKind,
    PayerName,
    PayerId,
    PayerKind,
    Method,
    CurrencyCode,
    Amount,
    Description,
}

impl FormField {
    const ORDER: [FormField; 10] = [
        Self::ReceiverName,
        Self::ReceiverId,
        Self::ReceiverKind,
        Self::PayerName,
        Self::PayerId,
        Self::PayerKind,
        Self::Method,
        Self::CurrencyCode,
        Self::Amount,
        Self::Description,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        !matches!(
            self,
            Self::ReceiverKind | Self::PayerKind | Self::Method | Self::CurrencyCode
        )
    }
}

/// The new-transaction form. Enum-valued fields cycle with Up/Down, text
/// fields take typed input.
#[derive(Debug)]
pub struct TransactionForm {
    pub receiver_name: String,
    pub receiver_id: String,
    pub receiver_kind: PartyKind,
    pub payer_name: String,
    pub payer_id: String,
    pub payer_kind: PartyKind,
    pub method: PaymentMethod,
    pub currency: Currency,
    pub amount: String,
    pub description: String,
    pub focus: FormField,
    pub message: Option<String>,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            receiver_name: String::new(),
            receiver_id: String::new(),
            receiver_kind: PartyKind::Individual,
            payer_name: String::new(),
            payer_id: String::new(),
            payer_kind: PartyKind::Individual,
            method: PaymentMethod::Cash,
            currency: Currency::Irr,
            amount: String::new(),
            description: String::new(),
            focus: FormField::ReceiverName,
            message: None,
        }
    }
}

impl TransactionForm {
    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::ReceiverName => Some(&mut self.receiver_name),
            FormField::ReceiverId => Some(&mut self.receiver_id),
            FormField::PayerName => Some(&mut self.payer_name),
            FormField::PayerId => Some(&mut self.payer_id),
            FormField::Amount => Some(&mut self.amount),
            FormField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    fn cycle(&mut self) {
        match self.focus {
            FormField::ReceiverKind => self.receiver_kind = toggle_kind(self.receiver_kind),
            FormField::PayerKind => self.payer_kind = toggle_kind(self.payer_kind),
            FormField::Method => {
                self.method = match self.method {
                    PaymentMethod::Cash => PaymentMethod::Account,
                    PaymentMethod::Account => PaymentMethod::Cash,
                }
            }
            FormField::CurrencyCode => {
                let all = Currency::ALL;
                let idx = all.iter().position(|c| *c == self.currency).unwrap_or(0);
                self.currency = all[(idx + 1) % all.len()];
            }
            _ => {}
        }
    }

    fn to_payload(&self) -> std::result::Result<NewTransaction, String> {
        let receiver_name = self.receiver_name.trim();
        if receiver_name.is_empty() {
            return Err("Receiver name is required.".to_string());
        }
        let amount = self
            .amount
            .trim()
            .parse::<u64>()
            .map_err(|_| "Amount must be a non-negative whole number.".to_string())?;

        Ok(NewTransaction {
            receiver: Party {
                kind: self.receiver_kind,
                name: receiver_name.to_string(),
                id: self.receiver_id.trim().to_string(),
            },
            payer: Party {
                kind: self.payer_kind,
                name: self.payer_name.trim().to_string(),
                id: self.payer_id.trim().to_string(),
            },
            payment_method: self.method,
            currency: self.currency,
            amount,
            description: self.description.trim().to_string(),
            datetime_iso: Utc::now().to_rfc3339(),
        })
    }
}

fn toggle_kind(kind: PartyKind) -> PartyKind {
    match kind {
        PartyKind::Individual => PartyKind::Legal,
        PartyKind::Legal => PartyKind::Individual,
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub selected: usize,
}

impl DashboardState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

pub struct AppState {
    pub screen: Screen,
    pub login: LoginForm,
    pub reset: ResetForm,
    pub form: TransactionForm,
    pub dashboard: DashboardState,
    pub base_url: String,
}

pub struct App {
    pub session: SessionStore,
    pub transactions: TransactionStore,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let tokens = TokenFile::load(&config.token_path)?;
        let client = ApiClient::new(
            config.base_url.clone(),
            tokens.clone(),
            config.csrf_token.clone(),
        );
        let session = SessionStore::new(client.clone(), tokens, config.endpoints.clone());
        let transactions = TransactionStore::new(client, config.endpoints.clone());

        // A persisted token skips the login view.
        let screen = nav::resolve(Screen::Form, session.is_authenticated());
        let state = AppState {
            screen,
            login: LoginForm {
                username: config.username.clone(),
                password: String::new(),
                focus: LoginField::Username,
                message: None,
            },
            reset: ResetForm {
                username: config.username.clone(),
                code: String::new(),
                new_password: String::new(),
                stage: ResetStage::RequestCode,
                focus: ResetField::Username,
                message: None,
            },
            form: TransactionForm::default(),
            dashboard: DashboardState::default(),
            base_url: config.base_url,
        };

        Ok(Self {
            session,
            transactions,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.bootstrap().await;
        let mut terminal = ui::init_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Restores the session behind a persisted token. A rejected token
    /// logs the session out, and the guard sends navigation back to login.
    async fn bootstrap(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.session.fetch_current_user().await;
        if self.session.is_authenticated() {
            self.transactions.fetch_transactions().await;
        } else {
            self.state.login.message = Some(Feedback::error("Session expired, sign in again."));
            self.navigate(Screen::Login);
        }
    }

    async fn event_loop(&mut self, terminal: &mut ui::UiTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| {
                    ui::render(
                        frame,
                        &self.state,
                        &self.session,
                        &self.transactions,
                    )
                })
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn navigate(&mut self, requested: Screen) {
        self.state.screen = nav::resolve(requested, self.session.is_authenticated());
    }

    async fn goto_dashboard(&mut self) {
        self.navigate(Screen::Dashboard);
        if self.state.screen == Screen::Dashboard && self.transactions.items().is_empty() {
            self.transactions.fetch_transactions().await;
            self.state.dashboard.selected = 0;
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match crate::ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Logout => {
                if self.state.screen.requires_auth() {
                    self.session.logout();
                    self.state.login.password.clear();
                    self.state.login.message = None;
                    self.navigate(Screen::Login);
                }
            }
            AppAction::OpenReset => {
                if self.state.screen == Screen::Login {
                    self.navigate(Screen::Reset);
                }
            }
            action => match self.state.screen {
                Screen::Login => self.handle_login_key(action).await?,
                Screen::Reset => self.handle_reset_key(action).await?,
                Screen::Form => self.handle_form_key(action).await?,
                Screen::Dashboard => self.handle_dashboard_key(action).await?,
            },
        }

        Ok(())
    }

    async fn handle_login_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            AppAction::Submit => self.attempt_login().await,
            AppAction::Backspace => {
                self.active_login_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_login_field_mut().push(ch);
            }
            AppAction::Cancel => self.state.login.message = None,
            _ => {}
        }
        Ok(())
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Username => &mut self.state.login.username,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn attempt_login(&mut self) {
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.trim().to_string();

        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some(Feedback::error("Enter username and password."));
            return;
        }

        match self.session.login(&username, &password).await {
            Ok(()) => {
                self.state.login.password.clear();
                self.state.login.message = None;
                self.navigate(Screen::Form);
            }
            Err(message) => {
                self.state.login.message = Some(Feedback::error(message));
            }
        }
    }

    async fn handle_reset_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField => self.state.reset.advance_focus(),
            AppAction::Submit => self.attempt_reset().await,
            AppAction::Backspace => {
                self.state.reset.active_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.state.reset.active_field_mut().push(ch);
            }
            AppAction::Cancel => {
                self.state.reset.message = None;
                self.navigate(Screen::Login);
            }
            _ => {}
        }
        Ok(())
    }

    async fn attempt_reset(&mut self) {
        match self.state.reset.stage {
            ResetStage::RequestCode => {
                let username = self.state.reset.username.trim().to_string();
                if username.is_empty() {
                    self.state.reset.message = Some(Feedback::error("Enter your username."));
                    return;
                }
                match self.session.request_reset_code(&username).await {
                    Ok(()) => {
                        self.state.reset.stage = ResetStage::Confirm;
                        self.state.reset.focus = ResetField::Code;
                        self.state.reset.message =
                            Some(Feedback::notice("Check your inbox for the reset code."));
                    }
                    Err(message) => self.state.reset.message = Some(Feedback::error(message)),
                }
            }
            ResetStage::Confirm => {
                let username = self.state.reset.username.trim().to_string();
                let code = self.state.reset.code.trim().to_string();
                let new_password = self.state.reset.new_password.trim().to_string();
                if code.is_empty() || new_password.is_empty() {
                    self.state.reset.message =
                        Some(Feedback::error("Enter the code and a new password."));
                    return;
                }
                match self
                    .session
                    .reset_password(&username, &code, &new_password)
                    .await
                {
                    Ok(()) => {
                        self.state.login.username = username;
                        self.state.login.message =
                            Some(Feedback::notice("Password updated, sign in."));
                        self.state.reset.code.clear();
                        self.state.reset.new_password.clear();
                        self.state.reset.stage = ResetStage::RequestCode;
                        self.state.reset.focus = ResetField::Username;
                        self.state.reset.message = None;
                        self.navigate(Screen::Login);
                    }
                    Err(message) => self.state.reset.message = Some(Feedback::error(message)),
                }
            }
        }
    }

    async fn handle_form_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField => self.state.form.focus = self.state.form.focus.next(),
            AppAction::Up | AppAction::Down => self.state.form.cycle(),
            AppAction::Submit => self.submit_transaction().await,
            AppAction::Backspace => {
                if let Some(field) = self.state.form.active_text_mut() {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = self.state.form.active_text_mut() {
                    field.push(ch);
                }
            }
            AppAction::Cancel => self.goto_dashboard().await,
            _ => {}
        }
        Ok(())
    }

    async fn submit_transaction(&mut self) {
        let payload = match self.state.form.to_payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.state.form.message = Some(message);
                return;
            }
        };

        match self.transactions.add_transaction(&payload).await {
            Ok(_) => {
                self.state.form = TransactionForm::default();
                self.state.dashboard.selected = 0;
                self.navigate(Screen::Dashboard);
            }
            Err(message) => self.state.form.message = Some(message),
        }
    }

    async fn handle_dashboard_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Up => self.state.dashboard.select_prev(),
            AppAction::Down => {
                let len = self.transactions.items().len();
                self.state.dashboard.select_next(len);
            }
            AppAction::Input('r') | AppAction::Input('R') => {
                self.transactions.fetch_transactions().await;
                self.state.dashboard.selected = 0;
            }
            AppAction::Input('n') | AppAction::Input('N') => self.navigate(Screen::Form),
            AppAction::Input('q') | AppAction::Input('Q') => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }
}
