//! Message templates.

use crate::{domain::items::records::ItemRecord, notifications::Notification};

pub const NEW_ITEM_SUBJECT: &str = "New rug available!";

/// One "new rug" message per recipient address.
#[must_use]
pub fn new_item_notifications(
    site_url: &str,
    item: &ItemRecord,
    recipients: Vec<String>,
) -> Vec<Notification> {
    let body = format!(
        "There is a new rug, \"{}\", available to purchase! To see this rug, visit {}/rug/{}",
        item.title,
        site_url.trim_end_matches('/'),
        item.uuid,
    );

    recipients
        .into_iter()
        .map(|recipient| Notification {
            subject: NEW_ITEM_SUBJECT.to_string(),
            body: body.clone(),
            recipient,
        })
        .collect()
}
