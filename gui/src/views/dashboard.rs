use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Element, Fill, Font, Length};

use relayfund_core::display::format_balance;

use crate::messages::Message;
use crate::{styles, App, MUTED};

impl App {
    pub(crate) fn view_dashboard(&self) -> Element<'_, Message> {
        let Some(relay) = &self.relay else {
            return text("No account loaded").into();
        };

        let title = text("Dashboard").size(24);
        let mut refresh = button(text("Refresh").size(13))
            .padding([8, 16])
            .style(styles::btn_secondary);
        if self.loading == 0 {
            refresh = refresh.on_press(Message::Refresh);
        }
        let header = row![title, Space::new().width(Fill), refresh]
            .align_y(iced::Alignment::Center);

        let mut col = column![header].spacing(16);
        col = self.push_status(col, "Loading...");

        col = col.push(self.view_signer_card());

        if relay.is_deployed {
            col = col.push(self.view_relay_card());
            col = col.push(
                row![
                    self.action_row(
                        "Deposit",
                        &self.deposit_amount,
                        Message::DepositAmountChanged,
                        Message::ConfirmDeposit,
                        false,
                    ),
                    self.action_row(
                        "Withdraw",
                        &self.withdraw_amount,
                        Message::WithdrawAmountChanged,
                        Message::ConfirmWithdraw,
                        true,
                    ),
                ]
                .spacing(16),
            );
        } else {
            col = col.push(self.view_undeployed_card());
        }

        col.into()
    }

    fn view_signer_card(&self) -> Element<'_, Message> {
        let address = self
            .signer_address
            .map(|a| a.to_string())
            .unwrap_or_default();
        let balance = self
            .signer_balance
            .map(format_balance)
            .unwrap_or_else(|| "-".into());

        let content = column![
            text("User").size(12).color(MUTED),
            row![
                text(address.clone()).size(13).font(Font::MONOSPACE),
                button(text("Copy").size(11))
                    .padding([4, 8])
                    .style(styles::btn_ghost)
                    .on_press(Message::CopyAddress(address)),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
            Space::new().height(4),
            text("Balance").size(12).color(MUTED),
            text(balance).size(16).font(styles::BOLD),
        ]
        .spacing(4);

        container(content)
            .padding(20)
            .width(Fill)
            .style(styles::card)
            .into()
    }

    fn view_relay_card(&self) -> Element<'_, Message> {
        let Some(relay) = &self.relay else {
            return Space::new().into();
        };
        let address = relay.address.to_string();

        let content = column![
            text("Your dedicated message sender").size(12).color(MUTED),
            row![
                text(address.clone()).size(13).font(Font::MONOSPACE),
                button(text("Copy").size(11))
                    .padding([4, 8])
                    .style(styles::btn_ghost)
                    .on_press(Message::CopyAddress(address)),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
            Space::new().height(4),
            text("Deployed").size(12).color(MUTED),
            text("True").size(13),
            Space::new().height(4),
            text("Balance").size(12).color(MUTED),
            text(format_balance(relay.balance)).size(16).font(styles::BOLD),
        ]
        .spacing(4);

        container(content)
            .padding(20)
            .width(Fill)
            .style(styles::card)
            .into()
    }

    fn view_undeployed_card(&self) -> Element<'_, Message> {
        let Some(relay) = &self.relay else {
            return Space::new().into();
        };
        let address = relay.address.to_string();

        let content = column![
            text("Your dedicated message sender is not deployed yet").size(14),
            row![
                text(address.clone()).size(13).font(Font::MONOSPACE),
                button(text("Copy").size(11))
                    .padding([4, 8])
                    .style(styles::btn_ghost)
                    .on_press(Message::CopyAddress(address)),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
            text("It will be deployed with its first task; funding becomes available then.")
                .size(12)
                .color(MUTED),
        ]
        .spacing(8);

        container(content)
            .padding(20)
            .width(Fill)
            .style(styles::card)
            .into()
    }

    /// One deposit/withdraw row: amount input, optional max toggle, submit.
    fn action_row<'a>(
        &'a self,
        label: &'a str,
        amount: &'a str,
        on_input: fn(String) -> Message,
        on_submit: Message,
        with_max: bool,
    ) -> Element<'a, Message> {
        let input = text_input("Amount (ETH)", amount)
            .on_input(on_input)
            .on_submit(on_submit.clone())
            .width(Length::Fixed(220.0));

        let mut controls = row![input].spacing(8).align_y(iced::Alignment::Center);

        if with_max {
            let mut max = button(text("Max").size(12))
                .padding([6, 12])
                .style(styles::toggle_btn(self.max));
            if self.loading == 0 {
                max = max.on_press(Message::ToggleMax);
            }
            controls = controls.push(max);
        }

        let mut submit = button(text(label).size(14))
            .padding([10, 24])
            .style(styles::btn_primary);
        if self.loading == 0 && !amount.is_empty() {
            submit = submit.on_press(on_submit);
        }
        controls = controls.push(submit);

        let content = column![text(label).size(16), controls].spacing(12);

        container(content)
            .padding(20)
            .width(Fill)
            .style(styles::card)
            .into()
    }
}
