//! Printable order summaries
//!
//! The summary is a standalone HTML page that asks the browser to print
//! itself when loaded. Rendering goes through `tera` with auto-escaping, so
//! free-text order fields cannot inject markup.

use serde::Serialize;
use std::sync::{Arc, Mutex};
use tera::{Context, Tera};

use crate::core::entity::Entity;
use crate::core::error::SuitcutResult;
use crate::core::order::Order;

const TEMPLATE_NAME: &str = "order_summary.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Order #{{ order_number }}</title>
<style>
body { font-family: sans-serif; margin: 24px; }
table { border-collapse: collapse; width: 100%; }
td, th { border: 1px solid #999; padding: 4px 8px; text-align: left; }
.amount { text-align: right; }
</style>
</head>
<body>
<h1>Order #{{ order_number }}</h1>
<p>Date: {{ date }}</p>
<p>Agent: {{ agent }}</p>
<p>Customer: {{ name }}</p>
<p>Tel: {{ mobile }}</p>
<p>Email: {{ email }}</p>
<p>Hotel: {{ hotel }}</p>
<p>Room: {{ room }}</p>
<table>
<thead><tr><th>Description</th><th class="amount">Amount</th></tr></thead>
<tbody>
{% for line in lines %}<tr class="line"><td>{{ line.description }}</td><td class="amount">{{ line.amount }}</td></tr>
{% endfor %}</tbody>
</table>
<p class="totals">Total: {{ total }} | Deposit: {{ deposit }} | Balance: {{ balance }}</p>
<p class="fabric">Fabric: {{ fabric_type }} | {{ fabric_per_item }} m/ea | Qty: {{ quantity }} | Total: {{ fabric_total }} m</p>
{% if attachment %}<img alt="Signature" src="{{ attachment }}">
{% endif %}<script>window.print();</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct LineRow<'a> {
    description: &'a str,
    amount: &'a str,
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Render the print summary of `order`
///
/// Only lines with a description are listed. Empty totals and fabric
/// values print as `-`.
pub fn render_order_summary(order: &Order, agent_name: &str) -> SuitcutResult<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

    let sheet = &order.sheet;
    let lines: Vec<LineRow> = order
        .filled_lines()
        .map(|l| LineRow {
            description: &l.description,
            amount: &l.amount,
        })
        .collect();

    let mut context = Context::new();
    context.insert("order_number", &sheet.order_number);
    context.insert("date", &sheet.date);
    context.insert("agent", agent_name);
    context.insert("name", &sheet.name);
    context.insert("mobile", &sheet.mobile);
    context.insert("email", &sheet.email);
    context.insert("hotel", &sheet.hotel);
    context.insert("room", &sheet.room);
    context.insert("lines", &lines);
    context.insert("total", or_dash(&sheet.total));
    context.insert("deposit", or_dash(&sheet.deposit));
    context.insert("balance", or_dash(&sheet.balance));
    context.insert("fabric_type", or_dash(&sheet.fabric_type));
    context.insert("fabric_per_item", or_dash(&sheet.fabric_per_item));
    context.insert("quantity", or_dash(&sheet.quantity));
    context.insert("fabric_total", or_dash(&sheet.fabric_total));
    context.insert(
        "attachment",
        &order.attachment.as_ref().map(|a| a.as_data_url()),
    );

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

/// A window a print document can be written into
pub trait PrintWindow: Send {
    fn write(&mut self, document: &str);
}

/// Something that can open print windows; `None` means it was blocked
pub trait PrintSurface: Send + Sync {
    fn open(&self) -> Option<Box<dyn PrintWindow>>;
}

/// Render `order` into a freshly opened window
///
/// Returns `Ok(false)` when the surface refused to open a window; nothing
/// is printed in that case.
pub fn print_order(
    surface: &dyn PrintSurface,
    order: &Order,
    agent_name: &str,
) -> SuitcutResult<bool> {
    let Some(mut window) = surface.open() else {
        tracing::warn!(order_id = %order.id(), "print window blocked, print aborted");
        return Ok(false);
    };
    let document = render_order_summary(order, agent_name)?;
    window.write(&document);
    Ok(true)
}

/// Print surface that keeps every written document in memory
#[derive(Debug, Clone, Default)]
pub struct BufferedPrintSurface {
    documents: Arc<Mutex<Vec<String>>>,
    blocked: bool,
}

impl BufferedPrintSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `open` always fails, like a blocked pop-up
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<String> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

struct BufferedWindow {
    documents: Arc<Mutex<Vec<String>>>,
}

impl PrintWindow for BufferedWindow {
    fn write(&mut self, document: &str) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.push(document.to_string());
        }
    }
}

impl PrintSurface for BufferedPrintSurface {
    fn open(&self) -> Option<Box<dyn PrintWindow>> {
        if self.blocked {
            return None;
        }
        Some(Box::new(BufferedWindow {
            documents: Arc::clone(&self.documents),
        }))
    }
}
