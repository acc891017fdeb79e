//! Order summary composition for staff notifications.
//!
//! Pure: turns an [`Order`] plus per-line resolved links into the
//! Markdown message the Telegram channel expects. Keeping the formatting
//! here means core order types know nothing about presentation.

use rust_decimal::Decimal;

use greenridge_core::order::Order;

/// Compose the staff-facing order summary.
///
/// `links` holds one optional external reference URL per order line, in
/// line order; lines with a link render as a Markdown link, the rest as
/// plain titles. Prices use the store currency (₾); shipping shows FREE
/// when the order shipped free.
#[must_use]
pub fn compose_order_summary(order: &Order, links: &[Option<String>]) -> String {
    let mut contact_lines = Vec::new();
    if let Some(phone) = order
        .customer
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        contact_lines.push(format!("📞 Phone: {phone}"));
    }
    for (platform, handle) in &order.customer.social {
        if !handle.trim().is_empty() {
            contact_lines.push(format!("💬 {}: {}", platform.as_str(), handle));
        }
    }
    let contact_details = contact_lines.join("\n");

    let items_list = order
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let title = match links.get(index).and_then(|l| l.as_deref()) {
                Some(url) => format!("[{}]({url})", line.title),
                None => line.title.clone(),
            };
            format!(
                "{}. {}\n   Qty: {} x ₾{:.2} = ₾{:.2}",
                index + 1,
                title,
                line.quantity,
                line.unit_price,
                line.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let shipping_text = if order.shipping_cost > Decimal::ZERO {
        format!("*🚚 Shipping: ₾{:.2}*", order.shipping_cost)
    } else {
        "*🚚 Shipping: FREE*".to_string()
    };

    format!(
        "🛒 *NEW ORDER* 🛒\n\n\
         👤 *Customer:* {}\n\
         {}\n\n\
         📦 *Order items:*\n\
         {}\n\n\
         *Subtotal: ₾{:.2}*\n\
         {}\n\
         *💰 TOTAL: ₾{:.2}*\n\n\
         📅 *Date:* {}",
        order.customer.name,
        contact_details,
        items_list,
        order.subtotal,
        shipping_text,
        order.total,
        order.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use greenridge_core::order::OrderLine;
    use greenridge_core::types::{
        CategoryKey, CustomerContact, ItemId, OrderId, SocialPlatform,
    };
    use std::collections::BTreeMap;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn order(shipping: &str) -> Order {
        let mut social = BTreeMap::new();
        social.insert(SocialPlatform::Telegram, "@nino".to_owned());
        let subtotal = d("75.00");
        Order {
            id: OrderId::generate(),
            customer: CustomerContact {
                name: "Nino Beridze".to_owned(),
                phone: Some("+995 555 123456".to_owned()),
                social,
            },
            lines: vec![
                OrderLine {
                    item_id: ItemId::new("7"),
                    title: "Folding trowel".to_owned(),
                    unit_price: d("32.50"),
                    quantity: 2,
                    category: "Garden".to_owned(),
                    category_key: CategoryKey::parse("garden").unwrap(),
                    image_url: None,
                },
                OrderLine {
                    item_id: ItemId::new("3"),
                    title: "Watering can".to_owned(),
                    unit_price: d("10.00"),
                    quantity: 1,
                    category: "Garden".to_owned(),
                    category_key: CategoryKey::parse("garden").unwrap(),
                    image_url: None,
                },
            ],
            subtotal,
            shipping_cost: d(shipping),
            total: subtotal + d(shipping),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary_contains_customer_block() {
        let message = compose_order_summary(&order("5"), &[None, None]);
        assert!(message.contains("👤 *Customer:* Nino Beridze"));
        assert!(message.contains("📞 Phone: +995 555 123456"));
        assert!(message.contains("💬 Telegram: @nino"));
    }

    #[test]
    fn test_summary_numbers_lines_with_totals() {
        let message = compose_order_summary(&order("5"), &[None, None]);
        assert!(message.contains("1. Folding trowel\n   Qty: 2 x ₾32.50 = ₾65.00"));
        assert!(message.contains("2. Watering can\n   Qty: 1 x ₾10.00 = ₾10.00"));
    }

    #[test]
    fn test_summary_renders_resolved_links_as_markdown() {
        let links = vec![Some("https://example.com/trowel".to_owned()), None];
        let message = compose_order_summary(&order("5"), &links);
        assert!(message.contains("1. [Folding trowel](https://example.com/trowel)"));
        assert!(message.contains("2. Watering can\n"));
    }

    #[test]
    fn test_summary_totals_and_paid_shipping() {
        let message = compose_order_summary(&order("5"), &[None, None]);
        assert!(message.contains("*Subtotal: ₾75.00*"));
        assert!(message.contains("*🚚 Shipping: ₾5.00*"));
        assert!(message.contains("*💰 TOTAL: ₾80.00*"));
        assert!(!message.contains("FREE"));
    }

    #[test]
    fn test_summary_free_shipping_branch() {
        let message = compose_order_summary(&order("0"), &[None, None]);
        assert!(message.contains("*🚚 Shipping: FREE*"));
        assert!(message.contains("*💰 TOTAL: ₾75.00*"));
    }

    #[test]
    fn test_summary_includes_timestamp() {
        let message = compose_order_summary(&order("5"), &[None, None]);
        assert!(message.contains("📅 *Date:* 2025-06-01 14:30 UTC"));
    }

    #[test]
    fn test_summary_skips_blank_contact_entries() {
        let mut o = order("5");
        o.customer.phone = Some("   ".to_owned());
        let message = compose_order_summary(&o, &[None, None]);
        assert!(!message.contains("📞"));
        assert!(message.contains("💬 Telegram: @nino"));
    }

    #[test]
    fn test_summary_with_missing_links_slice_renders_plain_titles() {
        // Shorter slice than lines; extra lines fall back to plain titles.
        let message = compose_order_summary(&order("5"), &[]);
        assert!(message.contains("1. Folding trowel"));
        assert!(message.contains("2. Watering can"));
    }
}
