//! Email rendering for outbox events.

use crate::outbox::models::OrderCompletedEmail;

/// Render the order-completed email as `(subject, html_body)`.
#[must_use]
pub fn order_completed(payload: &OrderCompletedEmail) -> (String, String) {
    let subject = format!("Your order is complete - {}", payload.order_number);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #4a2c2a; padding: 20px; text-align: center;">
    <h1 style="color: #f5e6d3; margin: 0;">dailybrew</h1>
  </div>
  <div style="padding: 20px; background-color: #ffffff;">
    <h2 style="color: #4a2c2a;">Hello {name},</h2>
    <p>Your order <strong>{order_number}</strong> is complete!</p>
    <p>Order total: <strong>Rp {total}</strong></p>
    <p>Thank you for ordering with dailybrew. We hope you enjoy it!</p>
    <p>Please consider leaving a rating and review for your order.</p>
    <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #e0e0e0;">
      <p style="color: #666; font-size: 12px;">
        This is an automated message, please do not reply.
      </p>
    </div>
  </div>
</div>"#,
        name = payload.name,
        order_number = payload.order_number,
        total = payload.total,
    );

    (subject, html)
}
