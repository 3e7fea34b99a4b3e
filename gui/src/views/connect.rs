use iced::widget::{button, column, container, text};
use iced::{Element, Fill};

use crate::messages::Message;
use crate::{styles, App, MUTED};

impl App {
    /// No wallet node reachable at the configured endpoint. Terminal until
    /// the app is restarted against a live wallet; nothing else is attempted.
    pub(crate) fn view_missing(&self) -> Element<'_, Message> {
        let col = column![
            text("Wallet not found").size(20),
            text(format!("No wallet node answered at {}", self.config.rpc_url))
                .size(13)
                .color(MUTED),
        ]
        .spacing(8)
        .align_x(iced::Alignment::Center);

        container(col).center_x(Fill).padding(40).into()
    }

    /// Wallet reachable but nothing authorized: the persistent connect
    /// prompt, rendered for both the pending and failed states.
    pub(crate) fn view_connect_prompt(&self) -> Element<'_, Message> {
        let mut connect = button(text("Connect Wallet").size(14))
            .padding([10, 24])
            .style(styles::btn_primary);
        if self.loading == 0 && self.session.is_some() {
            connect = connect.on_press(Message::Connect);
        }

        let mut col = column![
            text("Please connect your wallet").size(18),
            text(self.status.message.as_str()).size(13).color(MUTED),
            connect,
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center);

        if let Some(info) = &self.session {
            col = col.push(text(format!("Wallet node: {}", info.rpc_url)).size(11).color(MUTED));
        }

        let col = self.push_status(col, "Waiting for wallet...");

        container(col).center_x(Fill).padding(40).into()
    }
}
