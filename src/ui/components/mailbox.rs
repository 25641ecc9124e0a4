//! Mailbox list renderer.
//!
//! One row per email with ID, SENDER, SUBJECT and TIMESTAMP columns. The row
//! background comes from the read state: `read_bg` for read mail, `unread_bg`
//! otherwise.

use super::{render_empty_state, push_line};
use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmailRow, MailboxView};

const ID_WIDTH: usize = 6;
const SENDER_WIDTH: usize = 28;
const TIMESTAMP_WIDTH: usize = 24;

/// Width left for the subject after the fixed columns and their separators.
const fn subject_width(cols: usize) -> usize {
    cols.saturating_sub(ID_WIDTH + SENDER_WIDTH + TIMESTAMP_WIDTH + 3)
}

pub fn render_mailbox(out: &mut String, view: &MailboxView, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    push_line(out, &view.title, &theme.colors.text_normal, cols);

    if let Some(empty) = &view.empty_state {
        render_empty_state(out, empty, theme, cols);
        return;
    }

    out.push_str(Theme::bold());
    let headers = format!(
        "{} {} {} {}",
        fit("ID", ID_WIDTH),
        fit("SENDER", SENDER_WIDTH),
        fit("SUBJECT", subject_width(cols)),
        fit("TIMESTAMP", TIMESTAMP_WIDTH),
    );
    push_line(out, &headers, &theme.colors.text_dim, cols);

    for row in &view.rows {
        render_row(out, row, theme, cols);
    }
}

fn render_row(out: &mut String, row: &EmailRow, theme: &Theme, cols: usize) {
    let text = format!(
        "{} {} {} {}",
        fit(&row.id.to_string(), ID_WIDTH),
        fit(&row.sender, SENDER_WIDTH),
        fit(&row.subject, subject_width(cols)),
        fit(&row.timestamp, TIMESTAMP_WIDTH),
    );

    out.push_str(&Theme::bg(&row.background));
    if !row.read {
        out.push_str(Theme::bold());
    }
    push_line(out, &text, &theme.colors.row_fg, cols);
}
