mod helpers;
mod messages;
mod state;
mod styles;
mod update;
mod views;

use iced::theme::Palette;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Color, Element, Fill, Task, Theme};

use std::time::Duration;

use relayfund_core::{Address, ChainInfo, Fingerprint, RelayAccount, U256};

use messages::Message;
use state::{ConnectState, ConnectStatus, SessionInfo};

// Dashboard dark palette
const BG:      Color = Color::from_rgb(0.059, 0.059, 0.082); // #0f0f15
const SURFACE: Color = Color::from_rgb(0.106, 0.110, 0.153); // #1b1c27
const BORDER:  Color = Color::from_rgb(0.216, 0.224, 0.302); // #37394d
const MUTED:   Color = Color::from_rgb(0.478, 0.490, 0.580); // #7a7d94
const PRIMARY: Color = Color::from_rgb(0.992, 0.325, 0.325); // #fd5353

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relayfund=info".into()),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title("Relay Funding")
        .theme(App::theme)
        .subscription(App::subscription)
        .run()
}

// -- Config --

#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) rpc_url: String,
    pub(crate) factory: Option<Address>,
}

impl AppConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let rpc_url = Self::flag_value(&args, "--rpc-url")
            .unwrap_or_else(|| "http://127.0.0.1:8545".to_string());
        let factory = Self::flag_value(&args, "--factory")
            .or_else(|| std::env::var("RELAYFUND_FACTORY").ok())
            .and_then(|s| s.parse().ok());
        Self { rpc_url, factory }
    }

    fn flag_value(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    }
}

// -- App state --

struct App {
    config: AppConfig,
    session: Option<SessionInfo>,
    status: ConnectStatus,

    // Dashboard state, overwritten wholesale by each refresh
    chain: Option<ChainInfo>,
    signer_address: Option<Address>,
    signer_balance: Option<U256>,
    relay: Option<RelayAccount>,
    fingerprint: Fingerprint,

    // Form fields
    deposit_amount: String,
    withdraw_amount: String,
    max: bool,

    // UI state
    loading: u32,
    error_message: Option<String>,
    success_message: Option<String>,
    status_message: Option<String>,
    clipboard: Option<arboard::Clipboard>,

    // Cached theme (avoids re-allocating every frame)
    theme: Theme,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let mut app = Self::with_config(AppConfig::from_args());
        let task = app.bootstrap();
        (app, task)
    }

    fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            session: None,
            status: ConnectStatus::pending("Loading"),
            chain: None,
            signer_address: None,
            signer_balance: None,
            relay: None,
            fingerprint: Fingerprint::default(),
            deposit_amount: String::new(),
            withdraw_amount: String::new(),
            max: false,
            loading: 0,
            error_message: None,
            success_message: None,
            status_message: None,
            clipboard: arboard::Clipboard::new().ok(),
            theme: Theme::custom("Relayfund".to_string(), Palette {
                background: BG,
                text: Color::from_rgb(0.973, 0.973, 0.980),
                primary: PRIMARY,
                success: Color::from_rgb(0.278, 0.788, 0.569),
                warning: Color::from_rgb(0.969, 0.741, 0.227),
                danger: Color::from_rgb(0.906, 0.290, 0.290),
            }),
        }
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        // One subscription for the app's lifetime, scoped to a live session.
        if self.session.is_none() {
            return iced::Subscription::none();
        }
        iced::time::every(Duration::from_secs(3)).map(|_| Message::PollWallet)
    }

    // -- Views --

    fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match self.status.state {
            ConnectState::Missing => self.view_missing(),
            ConnectState::Pending | ConnectState::Failed => self.view_connect_prompt(),
            ConnectState::Success => self.view_dashboard(),
        };

        let separator = container(Space::new().height(1))
            .width(Fill)
            .style(|_theme| container::Style {
                border: iced::Border {
                    color: BORDER,
                    width: 1.0,
                    ..Default::default()
                },
                ..Default::default()
            });

        let col = column![self.view_header(), separator, container(content).padding(20)]
            .width(Fill);

        container(col).width(Fill).height(Fill).into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let title = text("Relay Funding").size(20).font(styles::BOLD);

        let status_label = text(self.status.message.as_str()).size(12).color(MUTED);

        let mut right = row![].spacing(8).align_y(iced::Alignment::Center);
        if let Some(chain) = &self.chain {
            right = right.push(
                container(text(chain.to_string()).size(12))
                    .padding([4, 10])
                    .style(styles::pill),
            );
        }
        match self.status.state {
            ConnectState::Success => {
                if let Some(addr) = &self.signer_address {
                    right = right.push(text(helpers::short_address(&addr.to_string())).size(12));
                }
                let mut disconnect = button(text("Disconnect").size(13))
                    .padding([6, 14])
                    .style(styles::btn_secondary);
                if self.loading == 0 {
                    disconnect = disconnect.on_press(Message::Disconnect);
                }
                right = right.push(disconnect);
            }
            ConnectState::Pending | ConnectState::Failed => {
                let mut connect = button(text("Connect").size(13))
                    .padding([6, 14])
                    .style(styles::btn_primary);
                if self.loading == 0 && self.session.is_some() {
                    connect = connect.on_press(Message::Connect);
                }
                right = right.push(connect);
            }
            ConnectState::Missing => {}
        }

        row![
            column![title, status_label].spacing(2),
            Space::new().width(Fill),
            right,
        ]
        .padding(15)
        .align_y(iced::Alignment::Center)
        .into()
    }
}
