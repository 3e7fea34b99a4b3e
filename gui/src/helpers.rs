use iced::widget::{text, Column};

use crate::messages::Message;
use crate::{styles, App, MUTED};

/// Shorten a 0x-address for inline display.
pub(crate) fn short_address(addr: &str) -> String {
    if addr.len() > 16 {
        format!("{}...{}", &addr[..8], &addr[addr.len() - 6..])
    } else {
        addr.to_string()
    }
}

impl App {
    /// Append loading, error, success, and status lines to a column.
    pub(crate) fn push_status<'a>(
        &'a self,
        col: Column<'a, Message>,
        loading_text: &'a str,
    ) -> Column<'a, Message> {
        let mut col = col;
        if self.loading > 0 {
            col = col.push(text(loading_text).size(13).color(MUTED));
        }
        if let Some(err) = &self.error_message {
            col = col.push(text(err.as_str()).size(13).color(styles::DANGER));
        }
        if let Some(msg) = &self.success_message {
            col = col.push(text(msg.as_str()).size(13).color(styles::ACCENT));
        }
        if let Some(msg) = &self.status_message {
            col = col.push(text(msg.as_str()).size(13).color(styles::ACCENT));
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_truncates_long() {
        let addr = "0x1111111111111111111111111111111111111111";
        assert_eq!(short_address(addr), "0x111111...111111");
    }

    #[test]
    fn short_address_keeps_short() {
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
