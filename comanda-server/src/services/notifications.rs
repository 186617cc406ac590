//! Customer email notifications (simulated)
//!
//! Subscribes to the manager's notice channel and logs the email that would
//! go out on each order event. No SMTP integration: the content is generated
//! and traced so a real mail provider can be dropped in behind
//! [`deliver`] later without touching the lifecycle code.

use crate::orders::OrderNotice;
use shared::phase::OrderPhase;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// A rendered notification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Spawn the background notification task.
pub fn spawn(mut rx: broadcast::Receiver<OrderNotice>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => deliver(&notice),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification stream lagged, emails dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Send one notification. Orders without a customer email are skipped.
fn deliver(notice: &OrderNotice) {
    let Some(email) = email_content(notice) else {
        return;
    };
    tracing::info!(
        to = %email.to,
        subject = %email.subject,
        "email notification (simulated)"
    );
    tracing::debug!(body = %email.body, "email body");
}

fn subject_for(status: OrderPhase) -> &'static str {
    match status {
        OrderPhase::Received => "Your order is confirmed!",
        OrderPhase::Cooking => "Your order is being prepared",
        OrderPhase::Packing => "Your order is being packed",
        OrderPhase::Delivering => "Your order is on the way!",
        OrderPhase::Delivered => "Your order has arrived",
    }
}

/// Render the email for a notice; `None` when there is nobody to notify.
pub fn email_content(notice: &OrderNotice) -> Option<EmailContent> {
    let (order_id, status, customer_name, customer_email) = match notice {
        OrderNotice::Created {
            order_id,
            status,
            customer_name,
            customer_email,
            ..
        }
        | OrderNotice::StatusChanged {
            order_id,
            status,
            customer_name,
            customer_email,
            ..
        } => (order_id, *status, customer_name, customer_email),
    };

    if customer_email.is_empty() {
        return None;
    }

    let greeting = if customer_name.is_empty() {
        "Hello".to_string()
    } else {
        format!("Hello {customer_name}")
    };
    let body = format!(
        "{greeting},\n\n{description}.\n\nOrder reference: {order_id}\n",
        description = status.description(),
    );

    Some(EmailContent {
        to: customer_email.clone(),
        subject: subject_for(status).to_string(),
        body,
    })
}
